//! Domain primitive types used across the scope-keys workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of key event delivered by the host.
///
/// `Press` carries the typed character and is layout dependent. `Up` carries
/// the physical key and is what Escape, Enter, and Backspace are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// A key produced a character.
    Press,
    /// A key was released.
    Up,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press => write!(f, "press"),
            Self::Up => write!(f, "up"),
        }
    }
}

/// Symbolic identifier of the physical key.
///
/// Decoding goes through the same normalization as [`KeyCode::from_char`],
/// so `{"key":"d"}` in a trace reads as `Key('D')`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "KeyCodeRepr")]
pub enum KeyCode {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// A letter or digit key, stored as upper-case ASCII (`Key('D')`).
    Key(char),
    /// Any key the classifier has no use for.
    #[default]
    Other,
}

impl KeyCode {
    /// Builds the physical-key code for a character, normalizing letters to
    /// upper case. Non-alphanumeric characters have no physical code.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        if c.is_ascii_alphanumeric() {
            Self::Key(c.to_ascii_uppercase())
        } else {
            Self::Other
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum KeyCodeRepr {
    Escape,
    Enter,
    Backspace,
    Tab,
    Key(char),
    Other,
}

impl From<KeyCodeRepr> for KeyCode {
    fn from(repr: KeyCodeRepr) -> Self {
        match repr {
            KeyCodeRepr::Escape => Self::Escape,
            KeyCodeRepr::Enter => Self::Enter,
            KeyCodeRepr::Backspace => Self::Backspace,
            KeyCodeRepr::Tab => Self::Tab,
            KeyCodeRepr::Key(c) => Self::from_char(c),
            KeyCodeRepr::Other => Self::Other,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Escape => write!(f, "Escape"),
            Self::Enter => write!(f, "Enter"),
            Self::Backspace => write!(f, "Backspace"),
            Self::Tab => write!(f, "Tab"),
            Self::Key(c) => write!(f, "Key{c}"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Modifier keys held during the interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Control key.
    pub ctrl: bool,
    /// Shift key.
    pub shift: bool,
    /// Alt/Option key.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Only the control key held.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// One physical key interaction as reported by the host.
///
/// Press events carry the typed character; Up events usually do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawKeyEvent {
    /// Channel the event arrived on.
    pub channel: Channel,
    /// Physical key.
    #[serde(default)]
    pub code: KeyCode,
    /// Typed character, if any.
    #[serde(default)]
    pub character: Option<char>,
    /// Modifier state.
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl RawKeyEvent {
    /// A press event for a typed character.
    #[must_use]
    pub fn press(c: char) -> Self {
        Self {
            channel: Channel::Press,
            code: KeyCode::from_char(c),
            character: Some(c),
            modifiers: Modifiers::NONE,
        }
    }

    /// A key-up event for a physical key.
    #[must_use]
    pub const fn up(code: KeyCode) -> Self {
        Self {
            channel: Channel::Up,
            code,
            character: None,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns the same event with the given modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// UI flags that modulate classification.
///
/// Owned and written by the state store; the classifier only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    /// The search box holds keyboard focus.
    pub search_focused: bool,
    /// A terminal pipe is open over the topology.
    pub terminal_showing: bool,
}

/// Direction to move the pinned metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinDirection {
    /// Step backwards (-1).
    Previous,
    /// Step forwards (+1).
    Next,
}

impl PinDirection {
    /// Signed step for this direction.
    #[must_use]
    pub const fn delta(self) -> i8 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Identifier of a metric that can be pinned or selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricId(String);

impl MetricId {
    /// Creates a metric ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application command emitted in response to input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Move keyboard focus into the search box.
    FocusSearch,
    /// Pin the neighbouring metric in the given direction.
    PinNextMetric(PinDirection),
    /// Remove the pinned metric.
    UnpinMetric,
    /// Select a metric, or clear the selection with `None`.
    SelectMetric(Option<MetricId>),
    /// Switch between graph and grid layouts.
    ToggleGridMode,
    /// Show or hide the help overlay.
    ToggleHelp,
    /// Escape was released.
    HitEsc,
    /// Enter was released.
    HitEnter,
    /// Backspace was released.
    HitBackspace,
    /// Redraw everything from current state.
    ForceRefresh,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FocusSearch => write!(f, "focus-search"),
            Self::PinNextMetric(dir) => write!(f, "pin-next-metric({})", dir.delta()),
            Self::UnpinMetric => write!(f, "unpin-metric"),
            Self::SelectMetric(None) => write!(f, "select-metric(null)"),
            Self::SelectMetric(Some(id)) => write!(f, "select-metric({id})"),
            Self::ToggleGridMode => write!(f, "toggle-grid-mode"),
            Self::ToggleHelp => write!(f, "toggle-help"),
            Self::HitEsc => write!(f, "hit-esc"),
            Self::HitEnter => write!(f, "hit-enter"),
            Self::HitBackspace => write!(f, "hit-backspace"),
            Self::ForceRefresh => write!(f, "force-refresh"),
        }
    }
}

/// Topology request parameters used for the initial fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyOptions {
    /// Topology to fetch (e.g. `hosts`, `containers`).
    pub topology: String,
    /// Extra `key=value` options, in request order.
    pub options: Vec<(String, String)>,
}

impl TopologyOptions {
    /// Options for a topology with no extra parameters.
    #[must_use]
    pub fn for_topology(topology: impl Into<String>) -> Self {
        Self {
            topology: topology.into(),
            options: Vec::new(),
        }
    }
}

/// Store values read once when the root component activates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupState {
    /// The router has already derived state from the URL.
    pub route_set: bool,
    /// Options of the currently active topology.
    pub topology_options: TopologyOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_code_normalizes_letters() {
        assert_eq!(KeyCode::from_char('d'), KeyCode::Key('D'));
        assert_eq!(KeyCode::from_char('7'), KeyCode::Key('7'));
        assert_eq!(KeyCode::from_char('/'), KeyCode::Other);
    }

    #[test]
    fn decoded_key_codes_are_normalized() {
        let line = r#"{"channel":"up","code":{"key":"d"},"modifiers":{"ctrl":true}}"#;
        let ev: RawKeyEvent = serde_json::from_str(line).expect("decode");
        assert_eq!(ev.code, KeyCode::Key('D'));
        assert!(ev.modifiers.ctrl);

        let symbol: KeyCode = serde_json::from_str(r#"{"key":"/"}"#).expect("decode");
        assert_eq!(symbol, KeyCode::Other);
        let named: KeyCode = serde_json::from_str(r#""escape""#).expect("decode");
        assert_eq!(named, KeyCode::Escape);
    }

    #[test]
    fn press_event_carries_character() {
        let ev = RawKeyEvent::press('q');
        assert_eq!(ev.channel, Channel::Press);
        assert_eq!(ev.character, Some('q'));
        assert_eq!(ev.code, KeyCode::Key('Q'));
    }

    #[test]
    fn trace_line_with_only_channel_and_character_parses() {
        let ev: RawKeyEvent =
            serde_json::from_str(r#"{"channel":"press","character":"?"}"#).expect("parse");
        assert_eq!(ev.code, KeyCode::Other);
        assert_eq!(ev.modifiers, Modifiers::NONE);
        assert_eq!(ev.character, Some('?'));
    }

    #[test]
    fn trace_line_with_physical_key_parses() {
        let ev: RawKeyEvent = serde_json::from_str(
            r#"{"channel":"up","code":{"key":"D"},"modifiers":{"ctrl":true}}"#,
        )
        .expect("parse");
        assert_eq!(ev, RawKeyEvent::up(KeyCode::Key('D')).with_modifiers(Modifiers::CTRL));
    }

    #[test]
    fn select_metric_null_displays_like_the_action_log() {
        assert_eq!(Action::SelectMetric(None).to_string(), "select-metric(null)");
        assert_eq!(
            Action::PinNextMetric(PinDirection::Previous).to_string(),
            "pin-next-metric(-1)"
        );
    }

    #[test]
    fn action_serializes_snake_case() {
        let json = serde_json::to_string(&Action::PinNextMetric(PinDirection::Next))
            .expect("serialize");
        assert_eq!(json, r#"{"pin_next_metric":"next"}"#);
        let json = serde_json::to_string(&Action::HitEsc).expect("serialize");
        assert_eq!(json, r#""hit_esc""#);
    }
}
