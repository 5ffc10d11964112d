//! End-to-end behaviour of the keyboard layer.
//!
//! Covers classification properties, dispatch ordering across a sequence
//! of events, and delivery through an activated coordinator whose context
//! changes between events.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use scope_common::config::{AddressingMode, RouterConfig};
use scope_common::error::Result;
use scope_common::types::{
    Action, Channel, Context, KeyCode, Modifiers, PinDirection, RawKeyEvent, StartupState,
    TopologyOptions,
};
use scope_keys::{
    ContextCell, DataFetcher, EventDispatchBridge, EventSource, LifecycleCoordinator, Router,
    SubscriptionId, classify,
};

// ── Classification properties ────────────────────────────────────────

fn every_context() -> [Context; 4] {
    [
        Context {
            search_focused: false,
            terminal_showing: false,
        },
        Context {
            search_focused: true,
            terminal_showing: false,
        },
        Context {
            search_focused: false,
            terminal_showing: true,
        },
        Context {
            search_focused: true,
            terminal_showing: true,
        },
    ]
}

fn sample_events() -> Vec<RawKeyEvent> {
    let mut events: Vec<RawKeyEvent> = (' '..='~').map(RawKeyEvent::press).collect();
    for code in [
        KeyCode::Escape,
        KeyCode::Enter,
        KeyCode::Backspace,
        KeyCode::Tab,
        KeyCode::Other,
    ] {
        events.push(RawKeyEvent::up(code));
        events.push(RawKeyEvent::up(code).with_modifiers(Modifiers::CTRL));
    }
    for c in 'A'..='Z' {
        events.push(RawKeyEvent::up(KeyCode::Key(c)).with_modifiers(Modifiers::CTRL));
    }
    events
}

#[test]
fn at_most_one_binding_fires_per_event() {
    for ctx in every_context() {
        for ev in sample_events() {
            let result = classify(&ev, ctx);
            let q_pair = result.actions == vec![Action::UnpinMetric, Action::SelectMetric(None)];
            assert!(result.actions.len() <= 1 || q_pair, "{ev:?} under {ctx:?}: {result:?}");
        }
    }
}

#[test]
fn classification_is_pure() {
    for ctx in every_context() {
        for ev in sample_events() {
            assert_eq!(classify(&ev, ctx), classify(&ev, ctx));
        }
    }
}

#[test]
fn only_slash_prevents_default() {
    for ctx in every_context() {
        for ev in sample_events() {
            let result = classify(&ev, ctx);
            if result.prevent_default {
                assert_eq!(ev.character, Some('/'));
                assert_eq!(result.actions, vec![Action::FocusSearch]);
            }
        }
    }
}

#[test]
fn ctrl_d_depends_only_on_terminal() {
    let ev = RawKeyEvent::up(KeyCode::Key('D')).with_modifiers(Modifiers::CTRL);
    for ctx in every_context() {
        let expected = if ctx.terminal_showing { vec![] } else { vec![Action::ForceRefresh] };
        assert_eq!(classify(&ev, ctx).actions, expected, "{ctx:?}");
    }
}

// ── Dispatch ordering ────────────────────────────────────────────────

#[test]
fn scenario_escape_grid_help() {
    let bridge = EventDispatchBridge::new(Context::default());
    let mut sink = Vec::new();
    for ev in [
        RawKeyEvent::up(KeyCode::Escape),
        RawKeyEvent::press('g'),
        RawKeyEvent::press('?'),
    ] {
        let _ = bridge.on_event(&ev, &mut sink);
    }
    assert_eq!(sink, vec![Action::HitEsc, Action::ToggleGridMode, Action::ToggleHelp]);
}

#[test]
fn lower_case_ctrl_d_in_trace_forces_refresh() {
    let line = r#"{"channel":"up","code":{"key":"d"},"modifiers":{"ctrl":true}}"#;
    let ev: RawKeyEvent = serde_json::from_str(line).expect("trace line");
    assert_eq!(classify(&ev, Context::default()).actions, vec![Action::ForceRefresh]);
}

#[test]
fn replayed_trace_matches_expected_actions() {
    let trace = r#"
{"channel":"press","character":"<"}
{"channel":"press","character":">"}
{"channel":"press","character":"q"}
{"channel":"up","code":"enter"}
{"channel":"up","code":{"key":"D"},"modifiers":{"ctrl":true}}
"#;
    let bridge = EventDispatchBridge::new(Context::default());
    let mut sink = Vec::new();
    for line in trace.lines().filter(|l| !l.trim().is_empty()) {
        let ev: RawKeyEvent = serde_json::from_str(line).expect("trace line");
        let _ = bridge.on_event(&ev, &mut sink);
    }
    assert_eq!(
        sink,
        vec![
            Action::PinNextMetric(PinDirection::Previous),
            Action::PinNextMetric(PinDirection::Next),
            Action::UnpinMetric,
            Action::SelectMetric(None),
            Action::HitEnter,
            Action::ForceRefresh,
        ]
    );
}

// ── Lifecycle ────────────────────────────────────────────────────────

type Journal = Rc<RefCell<Vec<String>>>;

struct JournalSource {
    journal: Journal,
    next: u64,
}

impl EventSource for JournalSource {
    fn subscribe(&mut self, channel: Channel) -> Result<SubscriptionId> {
        self.next += 1;
        self.journal.borrow_mut().push(format!("subscribe {channel}"));
        Ok(SubscriptionId::new(self.next))
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.journal.borrow_mut().push(format!("unsubscribe {}", id.get()));
    }
}

struct JournalRouter(Journal);

impl Router for JournalRouter {
    fn start(&mut self, config: &RouterConfig) {
        self.0
            .borrow_mut()
            .push(format!("router {:?}", config.addressing_mode));
    }
}

struct JournalFetcher(Journal);

impl DataFetcher for JournalFetcher {
    fn fetch_topologies(&mut self, options: &TopologyOptions) {
        self.0.borrow_mut().push(format!("topologies {}", options.topology));
    }

    fn fetch_api_details(&mut self) {
        self.0.borrow_mut().push("api".to_string());
    }
}

#[test]
fn subscriptions_precede_startup_calls() {
    let journal = Journal::default();
    let mut source = JournalSource { journal: Rc::clone(&journal), next: 0 };
    let mut router = JournalRouter(Rc::clone(&journal));
    let mut fetcher = JournalFetcher(Rc::clone(&journal));
    let mut lc = LifecycleCoordinator::new(
        EventDispatchBridge::new(Context::default()),
        RouterConfig { addressing_mode: AddressingMode::Hashbang },
    );
    let startup = StartupState {
        route_set: false,
        topology_options: TopologyOptions::for_topology("hosts"),
    };

    lc.activate(&mut source, &mut router, &mut fetcher, &startup).expect("activate");
    lc.deactivate(&mut source);
    lc.deactivate(&mut source);

    assert_eq!(
        *journal.borrow(),
        vec![
            "subscribe press",
            "subscribe up",
            "router Hashbang",
            "topologies hosts",
            "api",
            "unsubscribe 1",
            "unsubscribe 2",
        ]
    );
}

#[test]
fn context_changes_between_events_are_honoured() {
    let cell = ContextCell::default();
    let journal = Journal::default();
    let mut source = JournalSource { journal: Rc::clone(&journal), next: 0 };
    let mut lc = LifecycleCoordinator::new(
        EventDispatchBridge::new(cell.reader()),
        RouterConfig::default(),
    );
    lc.activate(
        &mut source,
        &mut JournalRouter(Rc::clone(&journal)),
        &mut JournalFetcher(Rc::clone(&journal)),
        &StartupState::default(),
    )
    .expect("activate");

    let mut sink = Vec::new();
    let outcome = lc.handle(&RawKeyEvent::press('/'), &mut sink);
    assert!(outcome.default_prevented);

    // the store reacts to FocusSearch by focusing the search box
    cell.publish(Context {
        search_focused: true,
        terminal_showing: false,
    });
    let outcome = lc.handle(&RawKeyEvent::press('/'), &mut sink);
    assert!(!outcome.default_prevented);
    let _ = lc.handle(&RawKeyEvent::up(KeyCode::Escape), &mut sink);

    assert_eq!(sink, vec![Action::FocusSearch, Action::HitEsc]);
}

#[test]
fn deactivated_coordinator_drops_events() {
    let journal = Journal::default();
    let mut source = JournalSource { journal: Rc::clone(&journal), next: 0 };
    let mut lc = LifecycleCoordinator::new(
        EventDispatchBridge::new(Context::default()),
        RouterConfig::default(),
    );
    lc.activate(
        &mut source,
        &mut JournalRouter(Rc::clone(&journal)),
        &mut JournalFetcher(Rc::clone(&journal)),
        &StartupState::default(),
    )
    .expect("activate");
    lc.deactivate(&mut source);

    let mut sink = Vec::new();
    let outcome = lc.handle(&RawKeyEvent::up(KeyCode::Escape), &mut sink);
    assert_eq!(outcome.dispatched, 0);
    assert!(sink.is_empty());
}
