// Quantum Slots TUI Module

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use qs_core::{poller::ConsolePoller, view::ViewUpdate};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::{runtime::Handle, sync::mpsc};

mod app;
mod ui;
mod widgets;

pub use app::{App, AppEvent, AppResult, Source};

use crate::session::Session;

/// How long to wait for a key before redrawing.
const TICK: Duration = Duration::from_millis(100);

/// Entry point for the TUI mode.
///
/// Runs on the calling thread; requests and the console
/// poller run on `runtime`.
pub fn run_tui(runtime: &Handle, session: &Session) -> AppResult<()> {
    // Log macros would draw over the screen.
    qs_core::print::set_print(false);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (sender, receiver) = mpsc::unbounded_channel();
    let app = App::new(session, sender.clone(), runtime.clone());
    let poller = ConsolePoller::spawn_on(runtime, session.api.clone(), session.poll, move |result| {
        _ = sender.send(AppEvent::Response {
            source: Source::Console,
            result: result.map(ViewUpdate::Console),
        });
    });

    let res = run_app(&mut terminal, app, receiver);
    poller.cancel();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    qs_core::print::set_print(true);

    res
}

/// Main event loop for the TUI
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut receiver: mpsc::UnboundedReceiver<AppEvent>,
) -> AppResult<()> {
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_event(AppEvent::Key(key));
                }
            }
        }

        // Responses in the order they arrived.
        while let Ok(event) = receiver.try_recv() {
            app.handle_event(event);
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
