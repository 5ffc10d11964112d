//! Key classification.
//!
//! Up events are matched on the physical key, so Escape, Enter and Backspace
//! work on every layout. Press events are matched on the typed character,
//! so `<`, `>` and `?` follow whatever layout the user types with. Escape
//! never produces a character and therefore only ever fires on Up.

use scope_common::types::{Action, Channel, Context, KeyCode, PinDirection, RawKeyEvent};

/// Actions fired by one key event, plus whether the host should suppress
/// the event's default handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Actions in dispatch order.
    pub actions: Vec<Action>,
    /// The host must not apply its own default for this event.
    pub prevent_default: bool,
}

impl Classification {
    /// No binding matched.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            actions: Vec::new(),
            prevent_default: false,
        }
    }

    fn single(action: Action) -> Self {
        Self {
            actions: vec![action],
            prevent_default: false,
        }
    }

    /// True when no action fires.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Classifies `event` under `ctx`. Total and stateless.
#[must_use]
pub fn classify(event: &RawKeyEvent, ctx: Context) -> Classification {
    match event.channel {
        Channel::Up => classify_up(event, ctx),
        Channel::Press => classify_press(event, ctx),
    }
}

fn classify_up(event: &RawKeyEvent, ctx: Context) -> Classification {
    match event.code {
        KeyCode::Escape => Classification::single(Action::HitEsc),
        KeyCode::Enter => Classification::single(Action::HitEnter),
        KeyCode::Backspace => Classification::single(Action::HitBackspace),
        KeyCode::Key('D') if event.modifiers.ctrl && !ctx.terminal_showing => {
            Classification::single(Action::ForceRefresh)
        }
        _ => Classification::none(),
    }
}

fn classify_press(event: &RawKeyEvent, ctx: Context) -> Classification {
    // the search box owns press input while focused
    if ctx.search_focused {
        return Classification::none();
    }
    let Some(c) = event.character else {
        return Classification::none();
    };
    match c {
        '<' => Classification::single(Action::PinNextMetric(PinDirection::Previous)),
        '>' => Classification::single(Action::PinNextMetric(PinDirection::Next)),
        't' | 'g' => Classification::single(Action::ToggleGridMode),
        'q' => Classification {
            actions: vec![Action::UnpinMetric, Action::SelectMetric(None)],
            prevent_default: false,
        },
        '/' => Classification {
            actions: vec![Action::FocusSearch],
            prevent_default: true,
        },
        '?' => Classification::single(Action::ToggleHelp),
        _ => Classification::none(),
    }
}

/// A documented key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Channel the binding listens on.
    pub channel: Channel,
    /// Key label as shown to the user.
    pub key: &'static str,
    /// What the binding does.
    pub description: &'static str,
    /// Binding is inactive while the search box is focused.
    pub blocked_by_search: bool,
}

const fn press(key: &'static str, description: &'static str) -> Binding {
    Binding {
        channel: Channel::Press,
        key,
        description,
        blocked_by_search: true,
    }
}

const fn up(key: &'static str, description: &'static str) -> Binding {
    Binding {
        channel: Channel::Up,
        key,
        description,
        blocked_by_search: false,
    }
}

/// Every binding [`classify`] knows, in precedence order per channel.
pub const BINDINGS: &[Binding] = &[
    up("Esc", "Close the topmost panel"),
    up("Enter", "Confirm search"),
    up("Backspace", "Delete search input"),
    up("Ctrl+D", "Force refresh (not while a terminal is open)"),
    press("<", "Pin previous metric"),
    press(">", "Pin next metric"),
    press("t / g", "Toggle grid mode"),
    press("q", "Unpin metric and clear selection"),
    press("/", "Focus search"),
    press("?", "Toggle help"),
];

/// Returns the binding table.
#[must_use]
pub const fn bindings() -> &'static [Binding] {
    BINDINGS
}
