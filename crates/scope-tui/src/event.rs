//! Terminal event handling.
//!
//! Captures keyboard and resize events from the terminal and turns key
//! events into [`RawKeyEvent`]s on the Press and Up channels.
//!
//! Terminals only report key releases when the keyboard enhancement
//! protocol is active. Without it the source synthesizes an Up event right
//! after each Press, which keeps Escape, Enter, and Backspace working.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use scope_common::config::KeyUpMode;
use scope_common::error::{Result, ScopeError};
use scope_common::types::{Channel, KeyCode, Modifiers, RawKeyEvent};
use scope_keys::{EventSource, SubscriptionId};

/// Terminal input events.
#[derive(Debug, Clone)]
pub enum TerminalEvent {
    /// A key changed state.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input arrived before the tick elapsed.
    Tick,
}

/// Waits up to `tick` for the next terminal event.
///
/// # Errors
///
/// Returns an error if polling or reading the terminal fails.
pub fn next_event(tick: Duration) -> Result<TerminalEvent> {
    if !event::poll(tick)? {
        return Ok(TerminalEvent::Tick);
    }
    Ok(match event::read()? {
        Event::Key(key) => TerminalEvent::Key(key),
        Event::Resize(w, h) => TerminalEvent::Resize(w, h),
        _ => TerminalEvent::Tick,
    })
}

/// Ctrl+C, which quits the host. Not a key binding.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && key.code == event::KeyCode::Char('c')
}

/// Decides whether Up events are native releases or synthesized.
///
/// `Auto` asks the terminal whether it supports the enhancement protocol.
pub fn native_key_up(mode: KeyUpMode) -> bool {
    match mode {
        KeyUpMode::Native => true,
        KeyUpMode::Synthesized => false,
        KeyUpMode::Auto => crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false),
    }
}

fn map_code(code: event::KeyCode) -> KeyCode {
    match code {
        event::KeyCode::Esc => KeyCode::Escape,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Char(c) => KeyCode::from_char(c),
        _ => KeyCode::Other,
    }
}

fn map_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        shift: modifiers.contains(KeyModifiers::SHIFT),
        alt: modifiers.contains(KeyModifiers::ALT),
    }
}

/// Typed character of a key event. Control and Alt chords type nothing.
fn typed_char(key: &KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        event::KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

/// Enhancement flags pushed for native releases.
///
/// Enter, Tab, and Backspace only report releases once every key is sent
/// as an escape code; alternate keys keep shifted symbols such as `?`
/// arriving as the character they type.
fn release_reporting_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
}

/// Crossterm-backed [`EventSource`].
#[derive(Debug)]
pub struct TerminalKeySource {
    native_release: bool,
    attached: bool,
    next_id: u64,
    press: Option<SubscriptionId>,
    up: Option<SubscriptionId>,
}

impl TerminalKeySource {
    /// A source that toggles the terminal's enhancement flags when the Up
    /// channel is subscribed with native releases.
    #[must_use]
    pub const fn attached(native_release: bool) -> Self {
        Self {
            native_release,
            attached: true,
            next_id: 0,
            press: None,
            up: None,
        }
    }

    /// A source that never writes to the terminal.
    #[must_use]
    pub const fn detached(native_release: bool) -> Self {
        Self {
            native_release,
            attached: false,
            next_id: 0,
            press: None,
            up: None,
        }
    }

    /// Whether `channel` has a live subscription.
    pub const fn is_subscribed(&self, channel: Channel) -> bool {
        match channel {
            Channel::Press => self.press.is_some(),
            Channel::Up => self.up.is_some(),
        }
    }

    /// Translates a terminal key event into channel events, in delivery
    /// order. Unsubscribed channels produce nothing.
    pub fn translate(&self, key: &KeyEvent) -> Vec<RawKeyEvent> {
        let code = map_code(key.code);
        let modifiers = map_modifiers(key.modifiers);
        let mut out = Vec::with_capacity(2);

        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);
        if pressed && self.press.is_some() {
            if let Some(c) = typed_char(key) {
                out.push(RawKeyEvent {
                    channel: Channel::Press,
                    code,
                    character: Some(c),
                    modifiers,
                });
            }
        }

        let released = if self.native_release {
            key.kind == KeyEventKind::Release
        } else {
            key.kind == KeyEventKind::Press
        };
        if released && self.up.is_some() {
            out.push(RawKeyEvent {
                channel: Channel::Up,
                code,
                character: None,
                modifiers,
            });
        }
        out
    }

    fn allocate(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId::new(self.next_id)
    }

    fn push_release_reporting(&self) -> io::Result<()> {
        if self.attached && self.native_release {
            crossterm::execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(release_reporting_flags())
            )?;
        }
        Ok(())
    }

    fn pop_release_reporting(&self) {
        if self.attached && self.native_release {
            if let Err(e) = crossterm::execute!(io::stdout(), PopKeyboardEnhancementFlags) {
                tracing::warn!(error = %e, "failed to restore keyboard flags");
            }
        }
    }
}

impl EventSource for TerminalKeySource {
    fn subscribe(&mut self, channel: Channel) -> Result<SubscriptionId> {
        if let Some(id) = match channel {
            Channel::Press => self.press,
            Channel::Up => self.up,
        } {
            return Ok(id);
        }
        if channel == Channel::Up {
            self.push_release_reporting()
                .map_err(|e| ScopeError::Subscription {
                    channel,
                    message: e.to_string(),
                })?;
        }
        let id = self.allocate();
        match channel {
            Channel::Press => self.press = Some(id),
            Channel::Up => self.up = Some(id),
        }
        tracing::debug!(
            %channel,
            id = id.get(),
            native_release = self.native_release,
            "subscribed"
        );
        Ok(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        if self.press == Some(id) {
            self.press = None;
        } else if self.up == Some(id) {
            self.up = None;
            self.pop_release_reporting();
        } else {
            return;
        }
        tracing::debug!(id = id.get(), "unsubscribed");
    }
}
