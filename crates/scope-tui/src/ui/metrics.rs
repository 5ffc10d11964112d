//! Metric selector row. The pinned metric is highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Renders the metric selector.
pub fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" metrics: ")];
    for (i, metric) in app.metrics.iter().enumerate() {
        let style = if app.pinned == Some(i) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(metric.to_string(), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled("< > pin  q unpin", Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
