//! What the client shows, as plain data.
//!
//! A [`ViewState`] is a snapshot. Every transition takes `&self`
//! and returns a new snapshot, so a renderer only ever sees
//! complete states and the order in which responses were applied
//! is the only thing deciding what ends up on screen.

use crate::json::{AttackResponse, ConsoleResponse, SpinResponse};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Reel symbols, space separated.
    pub reels: String,
    /// Message of the last attack.
    pub message: String,
    /// Whether the message is highlighted (blinking).
    pub blink: bool,
    /// The server log feed, newline separated.
    pub console: String,
    /// The toggle sent with spin/attack.
    pub flag: bool,
}

/// A successful response, waiting to be applied to whatever
/// the view looks like by the time it arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    Spin(SpinResponse),
    Attack(AttackResponse),
    Console(ConsoleResponse),
}

#[must_use]
pub fn join_reels(symbols: &[String]) -> String {
    symbols.join(" ")
}

impl ViewState {
    #[must_use]
    pub fn with_flag(flag: bool) -> Self {
        Self {
            flag,
            ..Default::default()
        }
    }

    /// Empties the message and stops the blink.
    /// Done at the start of every spin/attack.
    #[must_use]
    pub fn clear_message(&self) -> Self {
        Self {
            message: String::new(),
            blink: false,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_flag(&self) -> Self {
        Self {
            flag: !self.flag,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn apply_spin(&self, spin: &SpinResponse) -> Self {
        Self {
            reels: join_reels(&spin.result),
            ..self.clone()
        }
    }

    /// Successful attacks replace the reels and start the blink.
    /// Anything else stops the blink and leaves the reels alone.
    /// The message is always replaced.
    #[must_use]
    pub fn apply_attack(&self, attack: &AttackResponse) -> Self {
        let mut next = Self {
            message: attack.message.clone(),
            blink: attack.status.is_success(),
            ..self.clone()
        };
        if attack.status.is_success() {
            next.reels = join_reels(attack.result.as_deref().unwrap_or_default());
        }
        next
    }

    #[must_use]
    pub fn apply_console(&self, console: &ConsoleResponse) -> Self {
        Self {
            console: console.logs.join("\n"),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn apply(&self, update: &ViewUpdate) -> Self {
        match update {
            ViewUpdate::Spin(n) => self.apply_spin(n),
            ViewUpdate::Attack(n) => self.apply_attack(n),
            ViewUpdate::Console(n) => self.apply_console(n),
        }
    }
}
