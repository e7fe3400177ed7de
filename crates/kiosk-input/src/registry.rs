#![forbid(unsafe_code)]

//! Which field owns the on-screen keyboard.
//!
//! # State machine
//!
//! ```text
//!   Idle ──focus(f)──▶ Editing(f) ──focus(g)──▶ Editing(g)
//!    ▲                     │
//!    └──── close() ────────┘
//! ```
//!
//! The keyboard is visible exactly while a field is being edited; asking
//! for the keyboard without an active field is the same as `Idle`.
//!
//! The registry never touches the viewport. Focusing returns a
//! [`FocusIntent`] that the hosting UI interprets (show the keyboard, scroll
//! the input into view so the keyboard does not cover it).

/// Editing state of a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    /// No field active, keyboard hidden.
    #[default]
    Idle,
    /// The named field receives keystrokes.
    Editing(String),
}

impl EditState {
    /// The active field, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Editing(name) => Some(name),
        }
    }
}

/// Instruction for the hosting UI after a field gains focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusIntent {
    /// Field that now owns the keyboard.
    pub field: String,
    /// Show the on-screen keyboard.
    pub show_keyboard: bool,
    /// Bring the field into the visible viewport.
    pub scroll_into_view: bool,
}

/// Tracks the single active field of one page.
#[derive(Debug, Clone, Default)]
pub struct ActiveFieldRegistry {
    state: EditState,
}

impl ActiveFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `field` the active field and request the keyboard.
    ///
    /// Refocusing the already-active field still yields an intent, so the
    /// input is scrolled back into view.
    pub fn focus(&mut self, field: impl Into<String>) -> FocusIntent {
        let field = field.into();
        tracing::debug!(field = %field, "field focused");
        self.state = EditState::Editing(field.clone());
        FocusIntent {
            field,
            show_keyboard: true,
            scroll_into_view: true,
        }
    }

    /// Clear the active field and hide the keyboard.
    ///
    /// Returns the field that was active, if any.
    pub fn close(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            EditState::Idle => None,
            EditState::Editing(field) => {
                tracing::debug!(field = %field, "keyboard closed");
                Some(field)
            }
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.state.field()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// The keyboard is shown only while a field is being edited.
    pub fn keyboard_visible(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }
}
