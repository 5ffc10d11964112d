//! `scope-ui replay` — Classify a JSON-lines key event trace.
//!
//! Each non-blank line is one `RawKeyEvent`. Lines that do not parse are
//! logged and skipped; they never dispatch anything.

use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use scope_common::config::ScopeConfig;
use scope_common::types::{Action, Channel, Context, RawKeyEvent};
use scope_keys::{ContextGate, EventDispatchBridge};
use scope_tui::app::App;
use serde::Serialize;

use crate::output::format_replay_line;

/// Arguments for the `replay` command.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Trace file, or `-` for stdin.
    pub trace: PathBuf,

    /// Classify as if the search box were focused.
    #[arg(long)]
    pub search_focused: bool,

    /// Classify as if a terminal pipe were open.
    #[arg(long)]
    pub terminal_showing: bool,

    /// Feed actions back into a store so the context evolves between events.
    #[arg(long)]
    pub stateful: bool,

    /// Print one JSON object per event.
    #[arg(long)]
    pub json: bool,
}

/// Result of one replayed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayedEvent {
    /// 1-based line number in the trace.
    pub line: usize,
    /// Dispatched actions, in order.
    pub actions: Vec<Action>,
    /// The event's default handling was suppressed.
    pub prevent_default: bool,
}

/// Executes the `replay` command.
///
/// # Errors
///
/// Returns an error if the trace cannot be read.
pub fn execute(args: &ReplayArgs, config: &ScopeConfig) -> anyhow::Result<()> {
    let lines = read_trace(&args.trace)?;

    let initial = Context {
        search_focused: args.search_focused,
        terminal_showing: args.terminal_showing,
    };
    let results = if args.stateful {
        replay_stateful(&lines, initial, config)
    } else {
        replay(&lines, &EventDispatchBridge::new(initial), |_, _| {})
    };

    for result in &results {
        if args.json {
            println!("{}", serde_json::to_string(result)?);
        } else {
            println!(
                "{}",
                format_replay_line(result.line, &result.actions, result.prevent_default)
            );
        }
    }
    Ok(())
}

/// Reads the trace at `path`, or stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_trace(path: &Path) -> anyhow::Result<Vec<String>> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open trace {}", path.display()))?;
        Box::new(BufReader::new(file))
    };
    reader
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("cannot read trace")
}

/// Replays against a store seeded with `initial`, so focus and terminal
/// changes made by earlier actions affect later events.
pub fn replay_stateful(
    lines: &[String],
    initial: Context,
    config: &ScopeConfig,
) -> Vec<ReplayedEvent> {
    let mut app = App::new(config);
    if initial.search_focused {
        app.reduce(Action::FocusSearch);
    }
    if initial.terminal_showing {
        app.open_terminal("replay");
    }
    let bridge = EventDispatchBridge::new(app.context_reader());
    replay(lines, &bridge, |event, replayed| {
        for action in &replayed.actions {
            app.reduce(action.clone());
        }
        if event.channel == Channel::Press && !replayed.prevent_default {
            if let Some(c) = event.character {
                app.search_input(c);
            }
        }
    })
}

/// Classifies every parseable line through `bridge`, calling `after` once
/// per event with what it dispatched.
pub fn replay<G, F>(
    lines: &[String],
    bridge: &EventDispatchBridge<G>,
    mut after: F,
) -> Vec<ReplayedEvent>
where
    G: ContextGate,
    F: FnMut(&RawKeyEvent, &ReplayedEvent),
{
    let mut results = Vec::new();
    for (idx, text) in lines.iter().enumerate() {
        let line = idx + 1;
        if text.trim().is_empty() {
            continue;
        }
        let event: RawKeyEvent = match serde_json::from_str(text) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping malformed key event");
                continue;
            }
        };
        let mut actions = Vec::new();
        let outcome = bridge.on_event(&event, &mut actions);
        let replayed = ReplayedEvent {
            line,
            actions,
            prevent_default: outcome.default_prevented,
        };
        after(&event, &replayed);
        results.push(replayed);
    }
    results
}
