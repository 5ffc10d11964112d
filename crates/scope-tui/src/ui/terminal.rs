//! Terminal pipe view shown over the topology while a pipe is open.
//!
//! Ctrl+D belongs to the pipe while this view is up, so the force-refresh
//! binding is disabled.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

/// Renders the newest terminal pipe.
pub fn render_terminal(frame: &mut Frame, app: &App, area: Rect) {
    let name = app.control_pipes.last().map_or("", String::as_str);
    let block = Block::default()
        .title(format!(" terminal · {name} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let body = Paragraph::new(format!(
        "{} pipe(s) open. Esc closes the newest.",
        app.control_pipes.len()
    ))
    .block(block);
    frame.render_widget(body, area);
}
