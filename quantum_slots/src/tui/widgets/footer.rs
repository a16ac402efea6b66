// Quantum Slots TUI - Footer Widget

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;

/// Render the footer with status and help
pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16), Constraint::Length(20)])
        .split(area);

    let status = Paragraph::new(app.status_message.clone())
        .block(Block::default().borders(Borders::ALL).title(" Status "))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(status, chunks[0]);

    let (pending, color) = if app.pending == 0 {
        ("idle".to_owned(), Color::DarkGray)
    } else {
        (format!("{} pending", app.pending), Color::Yellow)
    };
    let pending = Paragraph::new(pending)
        .block(Block::default().borders(Borders::ALL).title(" Server "))
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    f.render_widget(pending, chunks[1]);

    let help = Paragraph::new("'?' help | 'q' quit")
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}
