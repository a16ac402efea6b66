//! Logging for the client.
//!
//! Every message goes to an in-memory buffer ([`get_logs`]).
//! Unless marked `no_log` it's also appended to
//! `QuantumSlots/logs/<date>.log`, and unless printing is turned off
//! ([`set_print`]) it's shown on the terminal.
//!
//! Use the macros, not these functions:
//! [`crate::info`], [`crate::pt`], [`crate::err`].

use std::{
    fmt::Display,
    fs::File,
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        LazyLock, Mutex,
    },
};

use crate::SLOTS_DIR;

mod macros;

/// Lines kept in memory before the oldest ones are dropped.
pub const MEMORY_CAP: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Info,
    Error,
    Point,
}

impl Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LogType::Info => "[info]",
                LogType::Error => "[error]",
                LogType::Point => "-",
            }
        )
    }
}

struct LoggingState {
    /// `None` until the first write, `Some(None)` if the file couldn't be opened.
    file: Option<Option<File>>,
    text: Vec<(String, LogType)>,
}

static LOGGER: LazyLock<Mutex<LoggingState>> = LazyLock::new(|| {
    Mutex::new(LoggingState {
        file: None,
        text: Vec::new(),
    })
});

static PRINT: AtomicBool = AtomicBool::new(true);

/// On Git Bash stderr doesn't show up reliably,
/// so errors go to stdout there.
pub static IS_GIT_BASH: LazyLock<bool> = LazyLock::new(|| {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "windows")] {
            std::env::var("MSYSTEM").is_ok_and(|n| n.starts_with("MINGW"))
        } else {
            false
        }
    }
});

/// Whether log macros should write to the terminal.
#[must_use]
pub fn is_print() -> bool {
    PRINT.load(Ordering::Relaxed)
}

/// Turn terminal output of the log macros on/off.
/// The TUI turns it off while it owns the screen.
pub fn set_print(print: bool) {
    PRINT.store(print, Ordering::Relaxed);
}

/// Push a line into the provided buffer with a maximum length constraint.
/// Returns the new length.
pub fn push_capped<T>(buf: &mut Vec<T>, line: T, cap: usize) -> usize {
    buf.push(line);
    if buf.len() > cap {
        let excess = buf.len() - cap;
        buf.drain(0..excess);
    }
    buf.len()
}

pub fn print_to_memory(msg: &str, t: LogType) {
    if let Ok(mut logger) = LOGGER.lock() {
        push_capped(&mut logger.text, (msg.to_owned(), t), MEMORY_CAP);
    }
}

pub fn print_to_file(msg: &str, t: LogType) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    push_capped(&mut logger.text, (msg.to_owned(), t), MEMORY_CAP);

    let file = logger.file.get_or_insert_with(open_log_file);
    if let Some(file) = file {
        let time = chrono::Local::now().format("%H:%M:%S");
        // Nowhere left to report a failed log write.
        _ = writeln!(file, "[{time}] {t} {msg}");
    }
}

fn open_log_file() -> Option<File> {
    let dir = SLOTS_DIR.as_ref()?.join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    let name = format!("{}.log", chrono::Local::now().format("%Y-%m-%d"));
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(name))
        .ok()
}

/// Everything logged during this session (up to [`MEMORY_CAP`] lines).
#[must_use]
pub fn get_logs() -> Vec<(String, LogType)> {
    LOGGER.lock().map(|n| n.text.clone()).unwrap_or_default()
}
