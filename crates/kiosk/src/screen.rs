#![forbid(unsafe_code)]

//! One data-entry page: a form session wired to the on-screen keyboard.
//!
//! # Lifecycle
//!
//! ```text
//!   new ──focus──▶ editing ◀──pointer/tick──┐
//!                     │  └───────────────────┘
//!                     ├──close_keyboard / submit──▶ idle
//!                     └──navigate_away──▶ (consumed)
//! ```
//!
//! The keyboard is only meaningful while a field is active. Pointer input
//! that arrives while the page is idle is dropped, and any repeat still
//! running is cancelled. Leaving the editing state always cancels the
//! backspace repeat, and [`Screen::navigate_away`] consumes the screen, so no
//! timer can outlive the page.

use std::time::{Duration, Instant};

use kiosk_core::config::{KioskConfig, RejectFeedback};
use kiosk_core::event::{Key, KeyEvent, PointerEvent};
use kiosk_input::{
    FieldSet, FocusIntent, FormSession, FormValues, Page, SessionError, SessionEvent, Submission,
};
use kiosk_keyboard::VirtualKeyboard;

use crate::Error;

/// What the host page should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Show the keyboard and scroll this field into view.
    Focus(FocusIntent),
    /// A field's displayed value changed.
    Changed { field: String, value: String },
    /// A key was refused. Only reported with [`RejectFeedback::Signal`].
    Rejected { field: String, key: Key },
    /// The last field was confirmed; the keyboard is hidden.
    Submitted(Submission),
}

/// A page's input state.
#[derive(Debug)]
pub struct Screen {
    session: FormSession,
    keyboard: VirtualKeyboard,
    feedback: RejectFeedback,
}

impl Screen {
    /// Create an idle screen over `fields`.
    pub fn new(fields: FieldSet, config: &KioskConfig) -> Self {
        Self {
            session: FormSession::new(fields),
            keyboard: VirtualKeyboard::new(config.backspace_repeat),
            feedback: config.reject_feedback,
        }
    }

    /// Create an idle screen for one of the kiosk's pages.
    pub fn for_page(page: Page, config: &KioskConfig) -> Result<Self, Error> {
        let fields = page.field_set()?;
        tracing::debug!(page = %page, fields = fields.len(), "screen opened");
        Ok(Self::new(fields, config))
    }

    /// The user tapped an input. A backspace still held for the previous
    /// field stops repeating.
    pub fn focus(&mut self, field: &str) -> Result<FocusIntent, SessionError> {
        let intent = self.session.focus(field)?;
        if self.keyboard.cancel_repeat() {
            tracing::debug!(field = %intent.field, "repeat cancelled: focus moved");
        }
        Ok(intent)
    }

    /// Route a pointer event from the keyboard surface.
    pub fn pointer(&mut self, event: PointerEvent, now: Instant) -> Option<ScreenEvent> {
        if !self.session.keyboard_visible() {
            if self.keyboard.cancel_repeat() {
                tracing::debug!("repeat cancelled: no active field");
            }
            return None;
        }
        let key = self.keyboard.pointer(event, now)?;
        self.route(key)
    }

    /// Deliver backspace repeats that fell due.
    pub fn tick(&mut self, now: Instant) -> Vec<ScreenEvent> {
        if !self.session.keyboard_visible() {
            self.keyboard.cancel_repeat();
            return Vec::new();
        }
        let mut events = Vec::new();
        for key in self.keyboard.tick(now) {
            events.extend(self.route(key));
            if !self.session.keyboard_visible() {
                break;
            }
        }
        events
    }

    fn route(&mut self, event: KeyEvent) -> Option<ScreenEvent> {
        let outcome = match self.session.handle_event(event) {
            SessionEvent::Ignored => None,
            SessionEvent::Focus(intent) => Some(ScreenEvent::Focus(intent)),
            SessionEvent::Changed { field, value } => Some(ScreenEvent::Changed { field, value }),
            SessionEvent::Rejected { field, key } => match self.feedback {
                RejectFeedback::Silent => None,
                RejectFeedback::Signal => Some(ScreenEvent::Rejected { field, key }),
            },
            SessionEvent::Submitted(submission) => Some(ScreenEvent::Submitted(submission)),
        };
        if !self.session.keyboard_visible() {
            self.keyboard.unmount();
        }
        outcome
    }

    /// The keyboard's close button.
    pub fn close_keyboard(&mut self) -> Option<String> {
        self.keyboard.unmount();
        self.session.close()
    }

    /// Load existing text into a field without focusing it, replacing
    /// whatever the field held.
    pub fn prefill(&mut self, field: &str, text: &str) -> Result<usize, SessionError> {
        self.session.prefill(field, text)
    }

    /// Leave the page, returning the values it held.
    pub fn navigate_away(mut self) -> FormValues {
        self.keyboard.unmount();
        self.session.close();
        tracing::debug!("screen closed");
        self.session.into_values()
    }

    /// Keyboard rows to draw, or `None` while the keyboard is hidden.
    pub fn keyboard_rows(&self) -> Option<Vec<String>> {
        self.session
            .keyboard_visible()
            .then(|| self.keyboard.render_rows())
    }

    /// How long the host may wait before the next [`Screen::tick`].
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.keyboard.time_until_next_repeat(now)
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn keyboard(&self) -> &VirtualKeyboard {
        &self.keyboard
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.session.value(field)
    }

    pub fn active_field(&self) -> Option<&str> {
        self.session.active()
    }

    pub fn keyboard_visible(&self) -> bool {
        self.session.keyboard_visible()
    }
}
