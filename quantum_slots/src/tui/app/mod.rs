// TUI App module root - re-exports state and core types

mod actions_ctrl;
mod events;
mod state;

pub use state::{App, AppEvent, AppResult, Source, IDLE_HINT};

#[cfg(test)]
pub(crate) use state::test_support;
