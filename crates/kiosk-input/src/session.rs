#![forbid(unsafe_code)]

//! Form session: one page's focus state, values and keystroke routing.
//!
//! The session is the single place where a logical key meets the active
//! field:
//!
//! 1. a field gains focus → the registry records it and a [`FocusIntent`]
//!    goes back to the host;
//! 2. each key is routed through the rule table for the active field;
//! 3. `Enter` asks the navigator for the next field, or submits.
//!
//! A session never blocks and never performs I/O. Pushing values to the
//! backend is the page's business once it receives
//! [`SessionEvent::Submitted`].

use std::fmt;

use kiosk_core::event::{Key, KeyEvent};

use crate::field::FieldSet;
use crate::navigator::Advance;
use crate::registry::{ActiveFieldRegistry, EditState, FocusIntent};
use crate::rules;
use crate::values::{FormValues, Submission};

/// What happened in response to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Nothing to do (no active field, or a key that never edits).
    Ignored,
    /// Focus moved; the host should show the keyboard and scroll.
    Focus(FocusIntent),
    /// The active field took a new value.
    Changed { field: String, value: String },
    /// The active field refused the key; its value is unchanged.
    Rejected { field: String, key: Key },
    /// `Enter` on the last field. The session is idle again.
    Submitted(Submission),
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The page has no field with this name.
    UnknownField(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "no field named '{name}' on this page"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Keystroke routing state for one page.
#[derive(Debug, Clone)]
pub struct FormSession {
    fields: FieldSet,
    values: FormValues,
    registry: ActiveFieldRegistry,
}

impl FormSession {
    /// Start an idle session with every field empty.
    pub fn new(fields: FieldSet) -> Self {
        let values = FormValues::for_fields(&fields);
        Self {
            fields,
            values,
            registry: ActiveFieldRegistry::new(),
        }
    }

    /// Give `name` the keyboard.
    pub fn focus(&mut self, name: &str) -> Result<FocusIntent, SessionError> {
        if !self.fields.contains(name) {
            return Err(SessionError::UnknownField(name.to_string()));
        }
        Ok(self.registry.focus(name))
    }

    /// Focus the first field in page order.
    pub fn focus_first(&mut self) -> FocusIntent {
        let first = self.fields.first().name().to_string();
        self.registry.focus(first)
    }

    /// Hide the keyboard and clear the active field.
    pub fn close(&mut self) -> Option<String> {
        self.registry.close()
    }

    /// Route a key event; repeats are handled like presses.
    pub fn handle_event(&mut self, event: KeyEvent) -> SessionEvent {
        self.handle_key(event.key)
    }

    /// Route one key to the active field.
    pub fn handle_key(&mut self, key: Key) -> SessionEvent {
        let Some(active) = self.registry.active().map(str::to_string) else {
            return SessionEvent::Ignored;
        };
        match key {
            Key::Enter => self.advance(&active),
            Key::Shift => SessionEvent::Ignored,
            _ => self.edit(active, key),
        }
    }

    fn advance(&mut self, active: &str) -> SessionEvent {
        match self.fields.advance(active) {
            Some(Advance::Next(next)) => {
                let next = next.to_string();
                SessionEvent::Focus(self.registry.focus(next))
            }
            Some(Advance::Submit) => {
                self.registry.close();
                let submission = self.submission();
                tracing::info!(
                    fields = self.fields.len(),
                    ready = submission.is_ready(),
                    "form submitted"
                );
                SessionEvent::Submitted(submission)
            }
            None => SessionEvent::Ignored,
        }
    }

    fn edit(&mut self, field: String, key: Key) -> SessionEvent {
        let (Some(descriptor), Some(current)) = (self.fields.get(&field), self.values.get(&field))
        else {
            return SessionEvent::Ignored;
        };
        let applied = rules::apply(descriptor, current, key);
        if !applied.accepted {
            tracing::debug!(field = %field, key = %key.name(), kind = %descriptor.kind(), "keystroke rejected");
            return SessionEvent::Rejected { field, key };
        }
        tracing::trace!(field = %field, key = %key.name(), "keystroke accepted");
        self.values.set(&field, applied.value.clone());
        SessionEvent::Changed {
            field,
            value: applied.value,
        }
    }

    /// Replace the value of `name` with `text` fed through the rule table,
    /// as if typed into an empty field.
    ///
    /// Used to load existing records into edit pages. Returns how many
    /// characters were accepted. Focus is left untouched.
    pub fn prefill(&mut self, name: &str, text: &str) -> Result<usize, SessionError> {
        let descriptor = self
            .fields
            .get(name)
            .ok_or_else(|| SessionError::UnknownField(name.to_string()))?;
        let mut value = String::new();
        let mut accepted = 0;
        for c in text.chars() {
            let key = if c == ' ' { Key::Space } else { Key::Char(c) };
            let applied = rules::apply(descriptor, &value, key);
            if applied.accepted {
                accepted += 1;
                value = applied.value;
            }
        }
        self.values.set(name, value);
        Ok(accepted)
    }

    /// Snapshot the current values with their completeness problems.
    pub fn submission(&self) -> Submission {
        Submission::capture(&self.fields, &self.values)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name)
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn state(&self) -> &EditState {
        self.registry.state()
    }

    pub fn active(&self) -> Option<&str> {
        self.registry.active()
    }

    pub fn keyboard_visible(&self) -> bool {
        self.registry.keyboard_visible()
    }

    /// End the session, handing back the final values.
    pub fn into_values(self) -> FormValues {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, TextKind};
    use tracing_test::traced_test;

    fn session() -> FormSession {
        FormSession::new(
            FieldSet::new(vec![
                FieldDescriptor::new("name", 0, TextKind::LettersOnly),
                FieldDescriptor::new("contact", 1, TextKind::PhoneNumber),
            ])
            .unwrap(),
        )
    }

    fn type_keys(session: &mut FormSession, text: &str) {
        for c in text.chars() {
            let key = if c == ' ' { Key::Space } else { Key::Char(c) };
            session.handle_key(key);
        }
    }

    #[test]
    fn idle_session_ignores_keys() {
        let mut s = session();
        assert_eq!(s.handle_key(Key::Char('a')), SessionEvent::Ignored);
        assert_eq!(s.handle_key(Key::Enter), SessionEvent::Ignored);
        assert_eq!(s.value("name"), Some(""));
    }

    #[test]
    fn focus_unknown_field_errors() {
        let mut s = session();
        let err = s.focus("email").unwrap_err();
        assert_eq!(err, SessionError::UnknownField("email".into()));
        assert_eq!(err.to_string(), "no field named 'email' on this page");
        assert_eq!(s.state(), &EditState::Idle);
    }

    #[test]
    fn typing_updates_active_field_only() {
        let mut s = session();
        s.focus("name").unwrap();
        assert_eq!(
            s.handle_key(Key::Char('j')),
            SessionEvent::Changed {
                field: "name".into(),
                value: "J".into()
            }
        );
        type_keys(&mut s, "uan");
        assert_eq!(s.value("name"), Some("Juan"));
        assert_eq!(s.value("contact"), Some(""));
    }

    #[test]
    fn rejected_key_leaves_value() {
        let mut s = session();
        s.focus("contact").unwrap();
        assert_eq!(
            s.handle_key(Key::Char('5')),
            SessionEvent::Rejected {
                field: "contact".into(),
                key: Key::Char('5')
            }
        );
        assert_eq!(s.value("contact"), Some(""));
    }

    #[test]
    fn shift_is_ignored() {
        let mut s = session();
        s.focus("name").unwrap();
        assert_eq!(s.handle_key(Key::Shift), SessionEvent::Ignored);
    }

    #[test]
    fn enter_moves_focus_then_submits() {
        let mut s = session();
        s.focus("name").unwrap();
        type_keys(&mut s, "ana");
        let SessionEvent::Focus(intent) = s.handle_key(Key::Enter) else {
            panic!("expected focus");
        };
        assert_eq!(intent.field, "contact");
        assert!(intent.scroll_into_view);
        type_keys(&mut s, "09171234567");
        let SessionEvent::Submitted(submission) = s.handle_key(Key::Enter) else {
            panic!("expected submit");
        };
        assert!(submission.is_ready());
        assert_eq!(s.state(), &EditState::Idle);
        assert!(!s.keyboard_visible());
    }

    #[test]
    fn submit_reports_incomplete_fields() {
        let mut s = session();
        s.focus("contact").unwrap();
        type_keys(&mut s, "0917");
        let SessionEvent::Submitted(submission) = s.handle_key(Key::Enter) else {
            panic!("expected submit");
        };
        let fields: Vec<_> = submission.problems().iter().map(|p| p.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "contact"]);
    }

    #[test]
    fn backspace_repeat_events_edit() {
        let mut s = session();
        s.focus("name").unwrap();
        type_keys(&mut s, "ab");
        let ev = KeyEvent::new(Key::Backspace).with_kind(kiosk_core::event::KeyEventKind::Repeat);
        s.handle_event(ev);
        s.handle_event(ev);
        s.handle_event(ev);
        assert_eq!(s.value("name"), Some(""));
    }

    #[test]
    fn prefill_runs_rules() {
        let mut s = session();
        assert_eq!(s.prefill("name", "maria 2 clara"), Ok(12));
        assert_eq!(s.value("name"), Some("Maria  Clara"));
        assert_eq!(s.active(), None);
        assert!(s.prefill("nope", "x").is_err());
    }

    #[test]
    fn prefill_replaces_previous_value() {
        let mut s = session();
        s.focus("name").unwrap();
        type_keys(&mut s, "ana");
        assert_eq!(s.prefill("name", "rosa"), Ok(4));
        assert_eq!(s.value("name"), Some("Rosa"));
        s.prefill("name", "li").unwrap();
        assert_eq!(s.value("name"), Some("Li"));
        assert_eq!(s.prefill("name", ""), Ok(0));
        assert_eq!(s.value("name"), Some(""));
    }

    #[test]
    fn close_and_into_values() {
        let mut s = session();
        s.focus_first();
        assert_eq!(s.active(), Some("name"));
        type_keys(&mut s, "li");
        assert_eq!(s.close(), Some("name".into()));
        let values = s.into_values();
        assert_eq!(values.get("name"), Some("Li"));
    }

    #[test]
    #[traced_test]
    fn rejection_is_logged() {
        let mut s = session();
        s.focus("contact").unwrap();
        s.handle_key(Key::Char('x'));
        assert!(logs_contain("keystroke rejected"));
    }
}
