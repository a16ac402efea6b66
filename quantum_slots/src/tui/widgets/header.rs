// Quantum Slots TUI - Header Widget

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use qs_core::VERSION_NAME;

use crate::tui::app::App;

/// Render the header: the toggle checkbox and the server address
pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let checkbox = if app.view.flag { "[x]" } else { "[ ]" };
    let checkbox_style = if app.view.flag {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::Gray)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {checkbox} "), checkbox_style),
        Span::raw(format!("{} ", app.flag_param.label())),
        Span::styled(format!("({}, space)", app.flag_param), Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled(app.base_url.clone(), Style::default().fg(Color::Cyan)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title_top(Line::from(format!(" Quantum Slots {VERSION_NAME} ")).centered()),
    );
    f.render_widget(header, area);
}
