//! Main loop that wires the terminal, the store, and the keyboard layer.
//!
//! Events are processed one at a time to completion. For each key event
//! the coordinator classifies first; the search box only sees the
//! character afterwards, and never when the binding suppressed the
//! default (typing `/` to focus search does not also type a `/`).

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use scope_common::config::ScopeConfig;
use scope_common::error::Result;
use scope_common::types::{Channel, RawKeyEvent};
use scope_keys::{ContextGate, EventDispatchBridge, LifecycleCoordinator};

use crate::app::App;
use crate::event::{self, TerminalEvent, TerminalKeySource};
use crate::router::{HashRouter, RequestLog};
use crate::ui;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Options for an interactive session.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Terminal pipe to open at startup.
    pub terminal: Option<String>,
}

/// Feeds one channel event through the coordinator, then the search box.
pub fn deliver<G: ContextGate>(
    coordinator: &LifecycleCoordinator<G>,
    app: &mut App,
    raw: &RawKeyEvent,
) {
    let outcome = coordinator.handle(raw, app);
    if outcome.default_prevented || raw.channel != Channel::Press {
        return;
    }
    if let Some(c) = raw.character {
        app.search_input(c);
    }
}

/// Runs the interactive UI until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn, or if the
/// key channels cannot be subscribed.
pub fn run(config: &ScopeConfig, options: &RunOptions) -> Result<()> {
    let mut app = App::new(config);
    if let Some(name) = &options.terminal {
        app.open_terminal(name.clone());
    }

    enable_raw_mode()?;
    enter_alternate_screen(&mut io::stdout(), || {
        let _ = disable_raw_mode();
    })?;
    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(Into::into)
        .and_then(|mut terminal| session(&mut terminal, config, &mut app));

    let _ = io::stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
    result
}

/// Switches `out` to the alternate screen, running `undo_raw_mode` if that
/// fails so the caller's terminal is not left in raw mode.
fn enter_alternate_screen<W: io::Write>(
    out: &mut W,
    undo_raw_mode: impl FnOnce(),
) -> Result<()> {
    if let Err(e) = out.execute(EnterAlternateScreen) {
        undo_raw_mode();
        return Err(e.into());
    }
    Ok(())
}

fn session(terminal: &mut Term, config: &ScopeConfig, app: &mut App) -> Result<()> {
    let native = event::native_key_up(config.key_up);
    let mut source = TerminalKeySource::attached(native);
    let mut router = HashRouter::new();
    let mut requests = RequestLog::default();
    let mut coordinator = LifecycleCoordinator::new(
        EventDispatchBridge::new(app.context_reader()),
        config.router.clone(),
    );
    coordinator.activate(&mut source, &mut router, &mut requests, &app.startup_state())?;

    let result = event_loop(terminal, config, app, &source, &coordinator, &requests);
    coordinator.deactivate(&mut source);
    result
}

fn event_loop<G: ContextGate>(
    terminal: &mut Term,
    config: &ScopeConfig,
    app: &mut App,
    source: &TerminalKeySource,
    coordinator: &LifecycleCoordinator<G>,
    requests: &RequestLog,
) -> Result<()> {
    let tick = Duration::from_millis(config.tick_rate_ms);
    let mut refreshes = app.refreshes;

    while app.running {
        if app.refreshes != refreshes {
            refreshes = app.refreshes;
            terminal.clear()?;
        }
        let view: &App = app;
        let _ = terminal.draw(|frame| ui::draw(frame, view, requests))?;

        match event::next_event(tick)? {
            TerminalEvent::Key(key) if event::is_interrupt(&key) => app.quit(),
            TerminalEvent::Key(key) => {
                for raw in source.translate(&key) {
                    deliver(coordinator, app, &raw);
                }
            }
            TerminalEvent::Resize(width, height) => {
                tracing::debug!(width, height, "resized");
            }
            TerminalEvent::Tick => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use scope_common::types::{Action, KeyCode};

    use super::*;

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_screen_switch_leaves_raw_mode() {
        let mut undone = false;
        let result = enter_alternate_screen(&mut BrokenPipe, || undone = true);
        assert!(result.is_err());
        assert!(undone);
    }

    #[test]
    fn screen_switch_keeps_raw_mode_on_success() {
        let mut out = Vec::new();
        let mut undone = false;
        enter_alternate_screen(&mut out, || undone = true).expect("switch");
        assert!(!undone);
        assert!(!out.is_empty());
    }

    fn activated(
        app: &App,
    ) -> (LifecycleCoordinator<scope_keys::ContextReader>, TerminalKeySource) {
        let mut source = TerminalKeySource::detached(false);
        let mut coordinator = LifecycleCoordinator::new(
            EventDispatchBridge::new(app.context_reader()),
            scope_common::config::RouterConfig::default(),
        );
        coordinator
            .activate(
                &mut source,
                &mut HashRouter::new(),
                &mut RequestLog::default(),
                &app.startup_state(),
            )
            .expect("activate");
        (coordinator, source)
    }

    #[test]
    fn slash_focuses_search_without_typing_it() {
        let mut app = App::new(&ScopeConfig::default());
        let (coordinator, _source) = activated(&app);

        for c in ['/', 'w', 'e', 'b', 'q'] {
            deliver(&coordinator, &mut app, &RawKeyEvent::press(c));
        }
        assert!(app.search.focused);
        assert_eq!(app.search.query, "webq");
        assert_eq!(app.last_action, Some(Action::FocusSearch));
    }

    #[test]
    fn escape_after_search_returns_to_bindings() {
        let mut app = App::new(&ScopeConfig::default());
        let (coordinator, _source) = activated(&app);

        deliver(&coordinator, &mut app, &RawKeyEvent::press('/'));
        deliver(&coordinator, &mut app, &RawKeyEvent::up(KeyCode::Escape));
        deliver(&coordinator, &mut app, &RawKeyEvent::press('g'));

        assert!(!app.search.focused);
        assert!(app.grid_mode);
    }

    #[test]
    fn deactivated_session_ignores_keys() {
        let mut app = App::new(&ScopeConfig::default());
        let (mut coordinator, mut source) = activated(&app);
        coordinator.deactivate(&mut source);
        assert!(!source.is_subscribed(Channel::Press));

        deliver(&coordinator, &mut app, &RawKeyEvent::press('?'));
        assert!(!app.showing_help);
    }
}
