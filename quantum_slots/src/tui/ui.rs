// Quantum Slots TUI - UI Rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use qs_core::view::ViewState;

use crate::tui::app::App;
use crate::tui::widgets::{render_footer, render_header, render_help_popup};

/// Main rendering function
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with the toggle
            Constraint::Length(5), // Reels
            Constraint::Length(3), // Attack message
            Constraint::Min(3),    // Server console
            Constraint::Length(3), // Footer with status
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_reels(f, chunks[1], &app.view);
    render_message(f, chunks[2], &app.view);
    render_console(f, chunks[3], &app.view);
    render_footer(f, chunks[4], app);

    if app.show_help_popup {
        render_help_popup(f, app);
    }
}

fn render_reels(f: &mut Frame, area: Rect, view: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title(" Reels ");
    let reels = if view.reels.is_empty() {
        Paragraph::new("press 's' to spin").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(view.reels.clone()).style(Style::default().fg(Color::White).bold())
    };

    // Vertically center the single line.
    let inner = block.inner(area);
    f.render_widget(block, area);
    let line = Rect {
        y: inner.y + inner.height.saturating_sub(1) / 2,
        height: inner.height.min(1),
        ..inner
    };
    f.render_widget(reels.alignment(Alignment::Center), line);
}

fn message_style(view: &ViewState) -> Style {
    if view.blink {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_message(f: &mut Frame, area: Rect, view: &ViewState) {
    let message = Paragraph::new(view.message.clone())
        .style(message_style(view))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Message "));
    f.render_widget(message, area);
}

/// Lines to skip so the newest console output stays in view.
fn console_scroll(console: &str, area: Rect) -> u16 {
    let visible = usize::from(area.height.saturating_sub(2));
    let lines = console.lines().count();
    u16::try_from(lines.saturating_sub(visible)).unwrap_or(u16::MAX)
}

fn render_console(f: &mut Frame, area: Rect, view: &ViewState) {
    let console = Paragraph::new(view.console.clone())
        .style(Style::default().fg(Color::Gray))
        .scroll((console_scroll(&view.console, area), 0))
        .block(Block::default().borders(Borders::ALL).title(" Server Console "));
    f.render_widget(console, area);
}
