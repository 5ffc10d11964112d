//! Views.
//!
//! ```text
//! ┌ scope · containers · graph ───────────────────┐
//! │ topology panel (or terminal pipe)               │
//! ├─────────────────────────────────────────────────┤
//! │ metrics: cpu [mem] load                         │
//! ├─────────────────────────────────────────────────┤
//! │ / search                                        │
//! └ status ─────────────────────────────────────────┘
//! ```

pub mod dashboard;
pub mod help;
pub mod metrics;
pub mod terminal;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::app::App;
use crate::router::RequestLog;

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App, requests: &RequestLog) {
    let [body, metrics_area, search_area, status_area] = Layout::vertical([
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    if app.control_pipes.is_empty() {
        dashboard::render_dashboard(frame, app, body);
    } else {
        terminal::render_terminal(frame, app, body);
    }
    metrics::render_metrics(frame, app, metrics_area);
    dashboard::render_search(frame, app, search_area);
    dashboard::render_status(frame, app, requests, status_area);

    if app.showing_help {
        help::render_help(frame, centered(frame.area(), 60, 16));
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 60, 16), Rect::new(20, 12, 60, 16));
    }

    #[test]
    fn centered_clips_to_small_areas() {
        let area = Rect::new(2, 1, 30, 10);
        assert_eq!(centered(area, 60, 16), area);
    }
}
