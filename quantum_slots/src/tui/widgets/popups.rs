// Quantum Slots TUI - Popup Widgets

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;

/// Render help popup
pub fn render_help_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title("❓ Help & Controls")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let help_paragraph = Paragraph::new(get_help(app))
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, area);
}

fn key_line(keys: &'static str, action: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{keys:<12}"), Style::default().fg(Color::Cyan)),
        Span::raw(action),
    ])
}

pub fn get_help(app: &App) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![Span::styled(
            "Quantum Slots Controls",
            Style::default().fg(Color::Yellow).bold(),
        )]),
        Line::from(""),
        key_line("s, Enter", "Spin the reels".to_owned()),
        key_line("a", "Attack (reels only change if it works)".to_owned()),
        key_line(
            "Space, t",
            format!("Toggle '{}' ({})", app.flag_param.label(), app.flag_param),
        ),
        key_line("r, F5", "Refresh the server console now".to_owned()),
        key_line("?", "Show/hide this help".to_owned()),
        key_line("q, Esc", "Quit".to_owned()),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press '?' or Esc to close this help",
            Style::default().fg(Color::Green).italic(),
        )]),
    ]
}

/// Helper function to center a rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
