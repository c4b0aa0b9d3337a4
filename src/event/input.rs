//! Input event types delivered by the embedding environment.
//!
//! Defines [`InputEvent`], [`KeyEvent`] and supporting types. Pointer input is
//! already resolved to the clicked node: hit-testing is the embedder's job.

use std::ops::BitOr;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, named after the DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
}

impl Key {
    /// The DOM `key` string for this key.
    pub fn dom_name(self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Enter => "Enter".into(),
            Key::Escape => "Escape".into(),
            Key::Tab => "Tab".into(),
            Key::Backspace => "Backspace".into(),
            Key::ArrowUp => "ArrowUp".into(),
            Key::ArrowDown => "ArrowDown".into(),
            Key::PageUp => "PageUp".into(),
            Key::PageDown => "PageDown".into(),
            Key::Home => "Home".into(),
            Key::End => "End".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);
    pub const META: Modifiers = Modifiers(8);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press without modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

impl From<Key> for KeyEvent {
    fn from(code: Key) -> Self {
        Self::plain(code)
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press at document level.
    Key(KeyEvent),
    /// Mouse wheel or touch scroll by a vertical delta in pixels.
    Wheel { delta_y: i32 },
    /// The window was resized.
    Resize { width: i32, height: i32 },
    /// A click that hit the given node.
    Click(NodeId),
    /// The value of a form field changed.
    Input { node: NodeId, value: String },
}

impl InputEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::Key(_) => "key",
            InputEvent::Wheel { .. } => "wheel",
            InputEvent::Resize { .. } => "resize",
            InputEvent::Click(_) => "click",
            InputEvent::Input { .. } => "input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_names() {
        assert_eq!(Key::Escape.dom_name(), "Escape");
        assert_eq!(Key::Char('a').dom_name(), "a");
    }

    #[test]
    fn modifiers_combine() {
        let m = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(m.contains(Modifiers::CTRL));
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::ALT));
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn key_into_plain_event() {
        let event: KeyEvent = Key::Enter.into();
        assert_eq!(event, KeyEvent::new(Key::Enter, Modifiers::NONE));
    }

    #[test]
    fn input_kind() {
        assert_eq!(InputEvent::Wheel { delta_y: 120 }.kind(), "wheel");
        assert_eq!(InputEvent::Key(Key::Tab.into()).kind(), "key");
    }
}
