//! Property-based invariant tests for the field rules and navigation.
//!
//! These tests drive arbitrary keyboard sequences through the rule table and
//! check invariants that must hold after every key:
//!
//! 1. Phone numbers stay on track to `09` + 9 digits and never exceed 11.
//! 2. Decimal amounts always match `^\d*(\.\d{0,2})?$`.
//! 3. A rejected key leaves the value untouched.
//! 4. Backspace on an empty value is a no-op; otherwise it drops one char.
//! 5. Enter and Shift never change a value.
//! 6. Letters-only values are always title-cased.
//! 7. A field's maximum length is never exceeded.
//! 8. Enter walks every field exactly once, then submits.

use kiosk_core::event::Key;
use kiosk_input::rules::{apply, is_amount, title_case};
use kiosk_input::{
    CharClass, FieldDescriptor, FieldSet, FormSession, SessionEvent, TextKind,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Keys the on-screen keyboard can emit.
fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        6 => prop::sample::select(
            "1234567890qwertyuiopasdfghjklzxcvbnmQWERTYUIOPASDFGHJKLZXCVBNM.,"
                .chars()
                .collect::<Vec<_>>()
        )
        .prop_map(Key::Char),
        1 => Just(Key::Space),
        2 => Just(Key::Backspace),
        1 => Just(Key::Enter),
        1 => Just(Key::Shift),
    ]
}

fn kind_strategy() -> impl Strategy<Value = TextKind> {
    prop_oneof![
        Just(TextKind::FreeText),
        Just(TextKind::LettersOnly),
        Just(TextKind::CapitalizedWords(CharClass::ADDRESS)),
        Just(TextKind::CapitalizedWords(CharClass::NAME)),
        Just(TextKind::DigitsOnly),
        Just(TextKind::PhoneNumber),
        Just(TextKind::DecimalAmount),
        Just(TextKind::SingleLetterInitial { period_required: true }),
        Just(TextKind::SingleLetterInitial { period_required: false }),
        Just(TextKind::Surname),
        Just(TextKind::OneOf(&["Male", "Female"])),
    ]
}

/// Every intermediate value while typing `keys` into `field`.
fn type_keys(field: &FieldDescriptor, keys: &[Key]) -> Vec<String> {
    let mut value = String::new();
    let mut seen = Vec::with_capacity(keys.len());
    for key in keys {
        value = apply(field, &value, *key).value;
        seen.push(value.clone());
    }
    seen
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Phone numbers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn phone_number_stays_well_formed(keys in prop::collection::vec(key_strategy(), 0..40)) {
        let field = FieldDescriptor::new("contact", 0, TextKind::PhoneNumber);
        for value in type_keys(&field, &keys) {
            prop_assert!(value.len() <= 11, "too long: {:?}", value);
            prop_assert!(value.bytes().all(|b| b.is_ascii_digit()), "non-digit: {:?}", value);
            if value.len() >= 2 {
                prop_assert!(value.starts_with("09"), "bad prefix: {:?}", value);
            } else {
                prop_assert!("09".starts_with(value.as_str()), "bad prefix: {:?}", value);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Decimal amounts
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn decimal_amount_matches_pattern(keys in prop::collection::vec(key_strategy(), 0..40)) {
        let field = FieldDescriptor::new("rent", 0, TextKind::DecimalAmount);
        for value in type_keys(&field, &keys) {
            prop_assert!(is_amount(&value), "bad amount: {:?}", value);
            prop_assert!(value.matches('.').count() <= 1);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Rejection is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rejected_key_keeps_value(
        kind in kind_strategy(),
        prefix in prop::collection::vec(key_strategy(), 0..20),
        key in key_strategy(),
    ) {
        let field = FieldDescriptor::new("f", 0, kind);
        let current = type_keys(&field, &prefix).pop().unwrap_or_default();
        let out = apply(&field, &current, key);
        if !out.accepted {
            prop_assert_eq!(&out.value, &current);
            let again = apply(&field, &out.value, key);
            prop_assert!(!again.accepted);
            prop_assert_eq!(again.value, current);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Backspace
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn backspace_drops_one_char(
        kind in kind_strategy(),
        prefix in prop::collection::vec(key_strategy(), 0..20),
    ) {
        let field = FieldDescriptor::new("f", 0, kind);
        let current = type_keys(&field, &prefix).pop().unwrap_or_default();
        let out = apply(&field, &current, Key::Backspace);
        prop_assert!(out.accepted);
        if current.is_empty() {
            prop_assert_eq!(out.value, "");
        } else {
            // The keyboard only inserts single-char graphemes.
            prop_assert_eq!(out.value.chars().count() + 1, current.chars().count());
            prop_assert!(current.starts_with(out.value.as_str()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Enter and Shift never edit
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn enter_and_shift_never_edit(
        kind in kind_strategy(),
        prefix in prop::collection::vec(key_strategy(), 0..20),
    ) {
        let field = FieldDescriptor::new("f", 0, kind);
        let current = type_keys(&field, &prefix).pop().unwrap_or_default();
        for key in [Key::Enter, Key::Shift] {
            let out = apply(&field, &current, key);
            prop_assert!(!out.accepted);
            prop_assert_eq!(&out.value, &current);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Title case
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn letters_only_is_title_cased(keys in prop::collection::vec(key_strategy(), 0..30)) {
        let field = FieldDescriptor::new("name", 0, TextKind::LettersOnly);
        for value in type_keys(&field, &keys) {
            prop_assert!(value.chars().all(|c| c.is_ascii_alphabetic() || c == ' '));
            prop_assert_eq!(title_case(&value), value);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Maximum length
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn max_length_is_never_exceeded(
        kind in kind_strategy(),
        max in 1usize..8,
        keys in prop::collection::vec(key_strategy(), 0..30),
    ) {
        let field = FieldDescriptor::new("f", 0, kind).max_length(max);
        for value in type_keys(&field, &keys) {
            prop_assert!(value.chars().count() <= max, "{:?} exceeds {}", value, max);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Navigation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn enter_visits_each_field_once(orders in prop::collection::btree_set(0u32..1000, 1..10)) {
        let fields: Vec<_> = orders
            .iter()
            .rev()
            .map(|order| FieldDescriptor::new(format!("field{order}"), *order, TextKind::FreeText))
            .collect();
        let set = FieldSet::new(fields).unwrap();
        let expected: Vec<String> = orders.iter().map(|o| format!("field{o}")).collect();

        let mut session = FormSession::new(set);
        let mut visited = vec![session.focus_first().field];
        let mut submits = 0;
        for _ in 0..expected.len() {
            match session.handle_key(Key::Enter) {
                SessionEvent::Focus(intent) => visited.push(intent.field),
                SessionEvent::Submitted(_) => submits += 1,
                other => prop_assert!(false, "unexpected event {:?}", other),
            }
        }
        prop_assert_eq!(visited, expected);
        prop_assert_eq!(submits, 1);
        prop_assert_eq!(session.handle_key(Key::Enter), SessionEvent::Ignored);
    }
}
