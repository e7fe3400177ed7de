#![forbid(unsafe_code)]

//! The virtual keyboard state machine.
//!
//! [`VirtualKeyboard`] turns pointer activity into logical key events. It has
//! no idea which field is active or what the field accepts; it only knows
//! the shift state and whether backspace is being held.
//!
//! # Invariants
//!
//! 1. Each `Down` yields exactly one event.
//! 2. Shift is one-shot: the next character key consumes it.
//! 3. At most one backspace repeat timer is alive, and `Up`/`Leave` stop it
//!    immediately.

use std::time::{Duration, Instant};

use kiosk_core::event::{Key, KeyCap, KeyEvent, KeyEventKind, PointerEvent};

use crate::layout;
use crate::repeat::BackspaceRepeat;

/// On-screen keyboard state.
#[derive(Debug, Clone)]
pub struct VirtualKeyboard {
    shift: bool,
    repeat: BackspaceRepeat,
}

impl Default for VirtualKeyboard {
    fn default() -> Self {
        Self::new(kiosk_core::config::DEFAULT_BACKSPACE_REPEAT)
    }
}

impl VirtualKeyboard {
    /// Create a keyboard whose held backspace repeats every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            shift: false,
            repeat: BackspaceRepeat::new(interval),
        }
    }

    /// Handle one pointer event.
    pub fn pointer(&mut self, event: PointerEvent, now: Instant) -> Option<KeyEvent> {
        match event {
            PointerEvent::Down(cap) => Some(KeyEvent::new(self.press(cap, now))),
            PointerEvent::Up | PointerEvent::Leave => {
                if self.repeat.stop() {
                    tracing::debug!("backspace repeat stopped");
                }
                None
            }
        }
    }

    fn press(&mut self, cap: KeyCap, now: Instant) -> Key {
        let key = match cap {
            KeyCap::Char(c) => {
                let c = if self.shift { c.to_ascii_uppercase() } else { c };
                self.shift = false;
                Key::Char(c)
            }
            KeyCap::Space => Key::Space,
            KeyCap::Enter => Key::Enter,
            KeyCap::Shift => {
                self.shift = !self.shift;
                Key::Shift
            }
            KeyCap::Backspace => {
                if self.repeat.start(now) {
                    tracing::debug!(
                        interval_ms = self.repeat.interval().as_millis() as u64,
                        "backspace repeat started"
                    );
                }
                Key::Backspace
            }
        };
        tracing::trace!(key = %key.name(), shift = self.shift, "key pressed");
        key
    }

    /// Backspace repeats that fell due up to `now`.
    pub fn tick(&mut self, now: Instant) -> Vec<KeyEvent> {
        let fired = self.repeat.poll(now);
        let event = KeyEvent::new(Key::Backspace).with_kind(KeyEventKind::Repeat);
        (0..fired).map(|_| event).collect()
    }

    /// Stop any repeat without a pointer event (keyboard hidden, field
    /// closed).
    pub fn cancel_repeat(&mut self) -> bool {
        self.repeat.stop()
    }

    /// Tear down: no timer and no pending shift survive.
    pub fn unmount(&mut self) {
        self.repeat.stop();
        self.shift = false;
        tracing::debug!("keyboard unmounted");
    }

    pub fn shift_active(&self) -> bool {
        self.shift
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_active()
    }

    /// Number of live repeat timers: zero or one.
    pub fn active_timers(&self) -> usize {
        self.repeat.active_timers()
    }

    /// When the next repeat is due, for the host's poll timeout.
    pub fn time_until_next_repeat(&self, now: Instant) -> Option<Duration> {
        self.repeat.time_until_next(now)
    }

    /// Rows of key labels for the current shift state.
    pub fn render_rows(&self) -> Vec<String> {
        layout::render_rows(self.shift)
    }
}
