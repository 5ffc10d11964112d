//! Help overlay listing every key binding.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Row, Table};
use scope_keys::classifier::bindings;

/// Renders the help overlay into `area`.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let rows = bindings().iter().map(|b| {
        let note = if b.blocked_by_search { "" } else { "always" };
        Row::new(vec![b.key, b.description, note])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["key", "action", ""]).style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(" keys ").borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(table, area);
}
