//! Event dispatch bridge.
//!
//! Reads the gate once per event, classifies, and hands each resulting
//! action to the sink in emission order.

use scope_common::constants::KEY_PRESS_TARGET;
use scope_common::types::{Action, RawKeyEvent};

use crate::classifier::classify;
use crate::context::ContextGate;

/// Receiver of dispatched actions.
pub trait ActionSink {
    /// Accepts one action.
    fn dispatch(&mut self, action: Action);
}

/// Collects actions in order.
impl ActionSink for Vec<Action> {
    fn dispatch(&mut self, action: Action) {
        self.push(action);
    }
}

impl<S: ActionSink + ?Sized> ActionSink for &mut S {
    fn dispatch(&mut self, action: Action) {
        (**self).dispatch(action);
    }
}

/// What happened to a single event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Number of actions handed to the sink.
    pub dispatched: usize,
    /// The originating event's default handling must be suppressed.
    pub default_prevented: bool,
}

/// Connects raw events to the sink through the classifier.
#[derive(Debug, Clone)]
pub struct EventDispatchBridge<G> {
    gate: G,
}

impl<G: ContextGate> EventDispatchBridge<G> {
    /// Creates a bridge reading context from `gate`.
    pub const fn new(gate: G) -> Self {
        Self { gate }
    }

    /// Returns the gate this bridge reads from.
    pub const fn gate(&self) -> &G {
        &self.gate
    }

    /// Classifies `raw` against the current context and dispatches the
    /// result.
    pub fn on_event<S: ActionSink + ?Sized>(
        &self,
        raw: &RawKeyEvent,
        sink: &mut S,
    ) -> EventOutcome {
        let ctx = self.gate.read();
        let classification = classify(raw, ctx);
        tracing::debug!(
            target: KEY_PRESS_TARGET,
            channel = %raw.channel,
            code = %raw.code,
            character = ?raw.character,
            ctrl = raw.modifiers.ctrl,
            search_focused = ctx.search_focused,
            terminal_showing = ctx.terminal_showing,
            actions = classification.actions.len(),
            "key event"
        );

        let dispatched = classification.actions.len();
        for action in classification.actions {
            sink.dispatch(action);
        }
        EventOutcome {
            dispatched,
            default_prevented: classification.prevent_default,
        }
    }
}
