//! # Core library of Quantum Slots
//!
//! A thin client for a quantum slot machine server.
//! This crate holds everything that isn't terminal UI:
//!
//! - [`json`]: the wire format of the three endpoints
//! - [`api`]: the [`api::GameApi`] trait and its HTTP implementation
//! - [`actions`]: spin/attack/console as typed requests
//! - [`view`]: the display state and its pure transitions
//! - [`poller`]: the background console poller
//! - [`print`]: logging (`info!`, `pt!`, `err!`)

use std::{path::PathBuf, sync::LazyLock};

pub mod actions;
pub mod api;
mod error;
pub mod json;
pub mod poller;
pub mod print;
pub mod view;

pub use error::{
    body_excerpt, IntoIoError, IntoJsonError, IoError, JsonError, JsonFileError, RequestError,
};

pub const VERSION_NAME: &str = env!("CARGO_PKG_VERSION");

/// Where the game server lives if nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Shared HTTP client. Cloning a [`reqwest::Client`] is cheap,
/// but building one isn't, so everything goes through this.
pub static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("quantum_slots/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
});

/// The directory holding `config.json` and `logs/`.
///
/// `None` if the platform has no config directory
/// (the client then runs on defaults and logs to memory only).
pub static SLOTS_DIR: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| dirs::config_dir().map(|n| n.join("QuantumSlots")));
