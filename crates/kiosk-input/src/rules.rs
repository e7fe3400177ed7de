#![forbid(unsafe_code)]

//! Per-keystroke field rules.
//!
//! [`apply`] takes a field, its current value and one key, and returns the
//! value the field should hold afterwards together with whether the key was
//! accepted. It is a pure function: a rejected key returns the input value
//! unchanged, and nothing is surfaced to the user at this layer.
//!
//! # Rule table
//!
//! | kind | accepts | formatting |
//! |------|---------|------------|
//! | free-text | any printable char | none |
//! | letters-only | `A-Z a-z` and space | title case |
//! | capitalized-words | the field's [`CharClass`] | title case |
//! | digits-only | `0-9` | none |
//! | phone-number | `0-9`, ≤ 11, prefix `09` | none |
//! | decimal-amount | `^\d*(\.\d{0,2})?$` | none |
//! | single-letter-initial | one letter, then `.` | upper case |
//! | surname | letters, space, one `.` | title case, suffixes upper |
//! | one-of | prefixes of the options | option casing |
//!
//! `Backspace` is always accepted and removes exactly the last grapheme
//! (a no-op on an empty value). `Enter` and `Shift` never change the value.

use std::fmt;

use kiosk_core::event::Key;
use unicode_segmentation::UnicodeSegmentation;

use crate::field::{CharClass, FieldDescriptor, PHONE_NUMBER_LEN, PHONE_NUMBER_PREFIX, TextKind};
use crate::values::Amount;

/// Generational suffixes kept upper-case in surnames.
const SURNAME_SUFFIXES: &[&str] = &["II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Suffixes allowed to carry a period.
const PERIOD_SUFFIXES: &[&str] = &["Jr.", "Sr."];

/// Outcome of applying one key to a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The value after the key.
    pub value: String,
    /// Whether the key was accepted.
    pub accepted: bool,
}

impl Applied {
    fn accept(value: String) -> Self {
        Self {
            value,
            accepted: true,
        }
    }

    fn reject(current: &str) -> Self {
        Self {
            value: current.to_string(),
            accepted: false,
        }
    }
}

/// Apply `key` to `current` under the rules of `field`.
pub fn apply(field: &FieldDescriptor, current: &str, key: Key) -> Applied {
    let Some(c) = key.text() else {
        return apply_control(current, key);
    };
    let Some(mut candidate) = insert(field.kind(), current, c) else {
        return Applied::reject(current);
    };
    if let Some(transform) = field.transform_fn() {
        candidate = transform(&candidate);
    }
    if let Some(max) = field.effective_max_length()
        && grapheme_len(&candidate) > max
    {
        return Applied::reject(current);
    }
    Applied::accept(candidate)
}

/// Apply `key` under a bare kind, with no length limit beyond the kind's own.
pub fn apply_kind(kind: TextKind, current: &str, key: Key) -> Applied {
    let Some(c) = key.text() else {
        return apply_control(current, key);
    };
    match insert(kind, current, c) {
        Some(candidate)
            if kind
                .inherent_max_length()
                .is_none_or(|max| grapheme_len(&candidate) <= max) =>
        {
            Applied::accept(candidate)
        }
        _ => Applied::reject(current),
    }
}

fn apply_control(current: &str, key: Key) -> Applied {
    match key {
        Key::Backspace => Applied::accept(remove_last(current).to_string()),
        _ => Applied::reject(current),
    }
}

/// Build the candidate value for inserting `c`, or `None` if the kind
/// forbids it.
fn insert(kind: TextKind, current: &str, c: char) -> Option<String> {
    let mut candidate = String::with_capacity(current.len() + c.len_utf8());
    candidate.push_str(current);
    candidate.push(c);

    match kind {
        TextKind::FreeText => (!c.is_control()).then_some(candidate),
        TextKind::LettersOnly => {
            (c.is_ascii_alphabetic() || c == ' ').then(|| title_case(&candidate))
        }
        TextKind::CapitalizedWords(class) => class.admits(c).then(|| title_case(&candidate)),
        TextKind::DigitsOnly => c.is_ascii_digit().then_some(candidate),
        TextKind::PhoneNumber => {
            (c.is_ascii_digit() && is_phone_prefix(&candidate)).then_some(candidate)
        }
        TextKind::DecimalAmount => is_amount(&candidate).then_some(candidate),
        TextKind::SingleLetterInitial { .. } => match (current.len(), c) {
            (0, c) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase().to_string()),
            (1, '.') => Some(candidate),
            _ => None,
        },
        TextKind::Surname => {
            let allowed = CharClass::NAME.admits(c) && !(c == '.' && current.contains('.'));
            allowed.then(|| format_surname(&candidate))
        }
        TextKind::OneOf(options) => complete_option(options, &candidate),
    }
}

/// Remove exactly the last grapheme.
pub fn remove_last(value: &str) -> &str {
    match value.grapheme_indices(true).next_back() {
        Some((start, _)) => &value[..start],
        None => value,
    }
}

fn grapheme_len(value: &str) -> usize {
    value.graphemes(true).count()
}

/// Capitalize the first letter of every space-separated word and lower-case
/// the rest. Runs of spaces are preserved.
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Title case with generational suffixes (`III`, `IV`, ...) upper-cased.
pub fn format_surname(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let upper = word.to_ascii_uppercase();
            if SURNAME_SUFFIXES.contains(&upper.as_str()) {
                upper
            } else {
                capitalize_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A partial phone number must stay on track to `09XXXXXXXXX`.
fn is_phone_prefix(value: &str) -> bool {
    value.len() <= PHONE_NUMBER_LEN
        && value.bytes().all(|b| b.is_ascii_digit())
        && if value.len() < PHONE_NUMBER_PREFIX.len() {
            PHONE_NUMBER_PREFIX.starts_with(value)
        } else {
            value.starts_with(PHONE_NUMBER_PREFIX)
        }
}

/// Matches `^\d*(\.\d{0,2})?$`.
pub fn is_amount(value: &str) -> bool {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };
    whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.is_none_or(|f| f.len() <= 2 && f.bytes().all(|b| b.is_ascii_digit()))
}

/// Normalize `candidate` to the casing of the first option it prefixes.
fn complete_option(options: &[&str], candidate: &str) -> Option<String> {
    options.iter().find_map(|option| {
        option
            .get(..candidate.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(candidate))
            .map(str::to_string)
    })
}

/// Why a field value cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemReason {
    /// A required field is empty.
    Missing,
    /// The value is a valid prefix but not a complete value.
    Incomplete(&'static str),
    /// The value is complete but malformed.
    Invalid(&'static str),
    /// A whole number outside the field's allowed range.
    OutOfRange { min: u64, max: u64 },
}

impl fmt::Display for ProblemReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("this field is required"),
            Self::Incomplete(msg) | Self::Invalid(msg) => f.write_str(msg),
            Self::OutOfRange { min, max } => write!(f, "must be a number between {min} and {max}"),
        }
    }
}

/// A submission-time problem with one field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "payload", derive(serde::Serialize))]
pub struct FieldProblem {
    pub field: String,
    #[cfg_attr(feature = "payload", serde(serialize_with = "crate::values::display"))]
    pub reason: ProblemReason,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Check whether `value` is ready to be submitted for `field`.
pub fn check(field: &FieldDescriptor, value: &str) -> Option<FieldProblem> {
    reason(field, value).map(|reason| FieldProblem {
        field: field.name().to_string(),
        reason,
    })
}

fn reason(field: &FieldDescriptor, value: &str) -> Option<ProblemReason> {
    if value.trim().is_empty() {
        return field.is_required().then_some(ProblemReason::Missing);
    }
    if let Some(len) = field.exact_len()
        && grapheme_len(value) != len
    {
        return Some(ProblemReason::Incomplete("value is too short"));
    }
    if let Some(range) = field.numeric_range()
        && !value.parse::<u64>().is_ok_and(|n| range.contains(&n))
    {
        return Some(ProblemReason::OutOfRange {
            min: *range.start(),
            max: *range.end(),
        });
    }
    match field.kind() {
        TextKind::PhoneNumber if value.len() != PHONE_NUMBER_LEN => Some(ProblemReason::Incomplete(
            "contact number must be 11 digits long and start with 09",
        )),
        TextKind::SingleLetterInitial {
            period_required: true,
        } if !value.ends_with('.') => Some(ProblemReason::Incomplete("use an initial like \"M.\"")),
        TextKind::DecimalAmount if value.ends_with('.') => {
            Some(ProblemReason::Incomplete("amount is missing its decimals"))
        }
        TextKind::DecimalAmount if Amount::parse(value).is_none() => {
            Some(ProblemReason::Invalid("amount is too large"))
        }
        TextKind::OneOf(options) if !options.contains(&value) => {
            Some(ProblemReason::Incomplete("choose one of the listed options"))
        }
        TextKind::Surname
            if value
                .split(' ')
                .any(|word| word.contains('.') && !PERIOD_SUFFIXES.contains(&word)) =>
        {
            Some(ProblemReason::Invalid("only Jr. or Sr. may carry a period"))
        }
        _ => None,
    }
}
