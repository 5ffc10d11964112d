//! Main dashboard: topology panel, search box, and status line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::router::RequestLog;

/// Renders the topology panel.
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let layout = if app.grid_mode { "grid" } else { "graph" };
    let title = format!(" scope · {} · {layout} ", app.topology.topology);

    let mut lines = vec![Line::from(format!("Topology: {}", app.topology.topology))];
    for (key, value) in &app.topology.options {
        lines.push(Line::from(format!("  {key} = {value}")));
    }
    if let Some(metric) = &app.selected_metric {
        lines.push(Line::from(format!("Selected metric: {metric}")));
    }
    if !app.search.query.is_empty() {
        lines.push(Line::from(format!("Filter: {}", app.search.query)));
    }

    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the search box, highlighted while focused.
pub fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.search.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if app.search.query.is_empty() && !app.search.focused {
        Line::from(Span::styled("press / to search", style))
    } else {
        Line::from(vec![
            Span::raw(app.search.query.clone()),
            Span::styled(if app.search.focused { "▏" } else { "" }, style),
        ])
    };
    let block = Block::default()
        .title(" search ")
        .borders(Borders::ALL)
        .border_style(style);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Renders the status line: last action and startup requests.
pub fn render_status(frame: &mut Frame, app: &App, requests: &RequestLog, area: Rect) {
    let last = app
        .last_action
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    let line = Line::from(vec![
        Span::styled(" last: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(last),
        Span::raw(format!("  refreshes: {}", app.refreshes)),
        Span::raw(format!("  requests: {}", requests.summary())),
        Span::styled("  ? help  ^C quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
