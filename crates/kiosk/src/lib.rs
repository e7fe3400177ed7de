#![forbid(unsafe_code)]

//! Boarding-house kiosk input core: public facade.
//!
//! Re-exports the event, field and keyboard types from the internal crates
//! and adds the [`Screen`](screen::Screen) that wires one page's form
//! session to the on-screen keyboard.

use std::fmt;

pub mod logging;
pub mod screen;

// --- Core re-exports -------------------------------------------------------

pub use kiosk_core::config::{ConfigError, ConfigParse, KioskConfig, LogFormat, RejectFeedback};
pub use kiosk_core::event::{Key, KeyCap, KeyEvent, KeyEventKind, PointerEvent};

// --- Input re-exports ------------------------------------------------------

pub use kiosk_input::{
    ActiveFieldRegistry, Advance, Amount, BillTotals, CharClass, EditState, FieldDescriptor,
    FieldProblem, FieldSet, FieldSetError, FocusIntent, FormSession, FormValue, FormValues, Page,
    ProblemReason, SessionError, SessionEvent, Submission, TextKind,
};

// --- Keyboard re-exports ---------------------------------------------------

pub use kiosk_keyboard::{BackspaceRepeat, VirtualKeyboard};

pub use screen::{Screen, ScreenEvent};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for the kiosk core.
#[derive(Debug)]
pub enum Error {
    /// A page declared an inconsistent field list.
    FieldSet(FieldSetError),
    /// A session operation named a field the page does not have.
    Session(SessionError),
    /// The global log subscriber could not be installed.
    Logging(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldSet(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::Logging(msg) => write!(f, "logging: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FieldSet(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<FieldSetError> for Error {
    fn from(err: FieldSetError) -> Self {
        Self::FieldSet(err)
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

/// Standard result type for kiosk APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, FieldDescriptor, FieldSet, FocusIntent, Key, KeyCap, KioskConfig, Page,
        PointerEvent, Result, Screen, ScreenEvent, Submission, TextKind,
    };

    pub use crate::{logging, screen};
}
