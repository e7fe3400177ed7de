#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The kiosk has no physical keyboard. Every keystroke originates from a
//! press on the on-screen keyboard, which is modelled in two layers:
//!
//! - [`PointerEvent`] is what the touch surface reports: a press on a
//!   [`KeyCap`], a release, or the pointer sliding off the keyboard.
//! - [`KeyEvent`] is the logical key the keyboard emits for the page to
//!   interpret in the context of whichever field is active.
//!
//! All types derive `Clone`, `PartialEq`, and `Eq` for use in tests and
//! pattern matching.

/// A logical key emitted by the virtual keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character, already shifted if shift was active.
    Char(char),

    /// Space bar.
    Space,

    /// Remove the last character of the active field.
    Backspace,

    /// Advance to the next field, or submit on the last one.
    Enter,

    /// Shift toggle. Never mutates a field value.
    Shift,
}

impl Key {
    /// The character this key inserts into a field, if any.
    #[must_use]
    pub const fn text(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Space => Some(' '),
            Self::Backspace | Self::Enter | Self::Shift => None,
        }
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Self::Char(ch) if *ch == c)
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Space => "Space".into(),
            Self::Backspace => "Backspace".into(),
            Self::Enter => "Enter".into(),
            Self::Shift => "Shift".into(),
        }
    }
}

/// Whether a key came from a discrete press or from the hold-to-repeat timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// A discrete press.
    #[default]
    Press,

    /// Synthesized while a key is held down.
    Repeat,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The logical key.
    pub key: Key,

    /// Press or repeat.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with Press kind.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this event was produced by the repeat timer.
    #[must_use]
    pub const fn is_repeat(&self) -> bool {
        matches!(self.kind, KeyEventKind::Repeat)
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// A physical button on the on-screen keyboard.
///
/// Letter caps are stored lower-case; the keyboard decides the emitted case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCap {
    /// A character button.
    Char(char),
    /// The space bar.
    Space,
    /// Backspace (supports hold-to-repeat).
    Backspace,
    /// Enter.
    Enter,
    /// Shift (one-shot).
    Shift,
}

impl KeyCap {
    /// Label shown on the button for the given shift state.
    #[must_use]
    pub fn label(&self, shift: bool) -> String {
        match self {
            Self::Char(c) if shift => c.to_uppercase().collect(),
            Self::Char(c) => c.to_string(),
            Self::Space => "Space".into(),
            Self::Backspace => "Backspace".into(),
            Self::Enter => "Enter".into(),
            Self::Shift => "Shift".into(),
        }
    }
}

/// Pointer activity on the keyboard surface.
///
/// Touch-start and mouse-down both map to [`Down`](Self::Down); touch-end and
/// mouse-up map to [`Up`](Self::Up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer pressed on a key.
    Down(KeyCap),
    /// Pointer released.
    Up,
    /// Pointer left the key it was pressed on.
    Leave,
}

impl PointerEvent {
    /// Returns true for events that end a press (release or leave).
    #[must_use]
    pub const fn ends_press(&self) -> bool {
        matches!(self, Self::Up | Self::Leave)
    }
}
