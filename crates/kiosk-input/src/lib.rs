#![forbid(unsafe_code)]

//! Field rules, navigation and focus routing for the kiosk's forms.
//!
//! # Role in the kiosk
//! `kiosk-input` decides what a keystroke means. The on-screen keyboard
//! (`kiosk-keyboard`) only emits logical [`Key`](kiosk_core::event::Key)s; a
//! [`FormSession`] routes each one to the active field, runs it through the
//! field's rule and either commits or drops it.
//!
//! # Primary responsibilities
//! - **Rules**: per-keystroke validation and formatting ([`rules`]).
//! - **Fields**: static per-page descriptors ([`field`], [`pages`]).
//! - **Navigation**: `Enter` moves forward or submits ([`navigator`]).
//! - **Focus**: the single active field and keyboard visibility
//!   ([`registry`]).
//!
//! # Feature flags
//! - `payload`: JSON bodies for submissions via serde.

pub mod field;
pub mod navigator;
pub mod pages;
pub mod registry;
pub mod rules;
pub mod session;
pub mod values;

pub use field::{CharClass, FieldDescriptor, FieldSet, FieldSetError, TextKind};
pub use navigator::Advance;
pub use pages::{BillTotals, Page};
pub use registry::{ActiveFieldRegistry, EditState, FocusIntent};
pub use rules::{Applied, FieldProblem, ProblemReason};
pub use session::{FormSession, SessionError, SessionEvent};
pub use values::{Amount, FormValue, FormValues, Submission};
