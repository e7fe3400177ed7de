#![forbid(unsafe_code)]

//! The per-page value bag and submission snapshots.

use std::fmt;

use crate::field::{FieldSet, TextKind};
use crate::rules::{self, FieldProblem};

/// Current value of every field on a page, in navigation order.
///
/// Read-only outside this crate: values change only through the rule
/// table's accept path (see [`FormSession`](crate::session::FormSession)).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues {
    entries: Vec<(String, String)>,
}

impl FormValues {
    /// One empty entry per field.
    pub(crate) fn for_fields(fields: &FieldSet) -> Self {
        Self {
            entries: fields
                .iter()
                .map(|f| (f.name().to_string(), String::new()))
                .collect(),
        }
    }

    /// Replace the value of an existing field. Returns `false` for unknown
    /// names.
    pub(crate) fn set(&mut self, name: &str, value: String) -> bool {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Value of a field by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(name, value)` pairs in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a decimal-amount field.
    pub fn amount(&self, name: &str) -> Option<Amount> {
        self.get(name).and_then(Amount::parse)
    }
}

/// A non-negative money amount with centavo precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    cents: u64,
}

impl Amount {
    pub const ZERO: Amount = Amount { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Parse text accepted by the decimal-amount rule (`12`, `12.5`, `.75`,
    /// `3.`). Returns `None` for empty input, a bare `.`, malformed text or
    /// overflow.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() || text == "." || !rules::is_amount(text) {
            return None;
        }
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };
        whole
            .checked_mul(100)?
            .checked_add(fraction)
            .map(Self::from_cents)
    }

    /// Sum two amounts, saturating at the maximum.
    #[must_use]
    pub const fn saturating_add(self, other: Amount) -> Amount {
        Amount::from_cents(self.cents.saturating_add(other.cents))
    }

    /// Value in pesos as a float, for JSON bodies.
    pub fn as_f64(self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[cfg(feature = "payload")]
impl serde::Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// A submitted field value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "payload", derive(serde::Serialize), serde(untagged))]
pub enum FormValue {
    Text(String),
    Amount(Amount),
}

impl FormValue {
    /// Text form of the value.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Amount(amount) => amount.to_string(),
        }
    }
}

/// Snapshot of a page's values at submission, plus anything that still
/// blocks the page from posting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    values: Vec<(String, FormValue)>,
    problems: Vec<FieldProblem>,
}

impl Submission {
    /// Capture `values` against the rules of `fields`.
    pub fn capture(fields: &FieldSet, values: &FormValues) -> Self {
        let mut captured = Vec::with_capacity(fields.len());
        let mut problems = Vec::new();
        for field in fields {
            let raw = values.get(field.name()).unwrap_or_default();
            if let Some(problem) = rules::check(field, raw) {
                problems.push(problem);
            }
            let value = match field.kind() {
                TextKind::DecimalAmount => FormValue::Amount(Amount::parse(raw).unwrap_or_default()),
                _ => FormValue::Text(raw.to_string()),
            };
            captured.push((field.name().to_string(), value));
        }
        Self {
            values: captured,
            problems,
        }
    }

    /// Value of a field by name.
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate `(name, value)` pairs in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn problems(&self) -> &[FieldProblem] {
        &self.problems
    }

    /// True when every field passed its completeness check.
    pub fn is_ready(&self) -> bool {
        self.problems.is_empty()
    }

    /// JSON object of field name to value, as posted by the page.
    #[cfg(feature = "payload")]
    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Serialized JSON body.
    #[cfg(feature = "payload")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Serializes as the page's POST body: one entry per field, in navigation
/// order. Problems are not part of the body.
#[cfg(feature = "payload")]
impl serde::Serialize for Submission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "payload")]
pub(crate) fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: serde::Serializer,
{
    serializer.collect_str(value)
}
