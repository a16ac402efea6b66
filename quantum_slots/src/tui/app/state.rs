// Quantum Slots TUI - Application State

use std::{error::Error, fmt, sync::Arc};

use crossterm::event::KeyEvent;
use qs_core::{
    api::{FlagParam, GameApi},
    view::{ViewState, ViewUpdate},
    RequestError,
};
use tokio::{runtime::Handle, sync::mpsc};

use crate::session::Session;

pub type AppResult<T> = Result<T, Box<dyn Error>>;

pub const IDLE_HINT: &str = "Press 's' to spin, 'a' to attack, '?' for help.";

/// Which request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Spin,
    Attack,
    Console,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Spin => write!(f, "Spin"),
            Source::Attack => write!(f, "Attack"),
            Source::Console => write!(f, "Console refresh"),
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// A request finished, in whatever order the server answered.
    Response {
        source: Source,
        result: Result<ViewUpdate, RequestError>,
    },
}

pub struct App {
    pub view: ViewState,
    pub base_url: String,
    pub flag_param: FlagParam,
    pub status_message: String,
    pub show_help_popup: bool,
    pub should_quit: bool,
    /// Spins and attacks still waiting for the server.
    pub pending: usize,
    pub(super) api: Arc<dyn GameApi>,
    pub(super) events: mpsc::UnboundedSender<AppEvent>,
    pub(super) runtime: Handle,
}

impl App {
    pub fn new(session: &Session, events: mpsc::UnboundedSender<AppEvent>, runtime: Handle) -> Self {
        Self {
            view: ViewState::with_flag(session.flag),
            base_url: session.base_url.clone(),
            flag_param: session.flag_param,
            status_message: IDLE_HINT.to_owned(),
            show_help_popup: false,
            should_quit: false,
            pending: 0,
            api: session.api.clone(),
            events,
            runtime,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn toggle_help_popup(&mut self) {
        self.show_help_popup = !self.show_help_popup;
    }
}
