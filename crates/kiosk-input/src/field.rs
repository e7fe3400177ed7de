#![forbid(unsafe_code)]

//! Field descriptors and per-page field sets.
//!
//! A page declares its inputs once, as a list of [`FieldDescriptor`]s. The
//! [`FieldSet`] built from that list is static for the lifetime of the page
//! and defines both the rule applied to each keystroke and the order in
//! which `Enter` walks through the inputs.

use std::fmt;
use std::ops::RangeInclusive;

use bitflags::bitflags;

use crate::navigator::{self, Advance};

bitflags! {
    /// Character classes a free-form capitalized field admits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        /// ASCII letters.
        const LETTERS = 0b0000_0001;
        /// ASCII digits.
        const DIGITS = 0b0000_0010;
        /// The space character.
        const SPACE = 0b0000_0100;
        /// `.`
        const PERIOD = 0b0000_1000;
        /// `,`
        const COMMA = 0b0001_0000;
        /// Any other ASCII punctuation (`-`, `#`, `/`, `!`, ...).
        const PUNCTUATION = 0b0010_0000;

        /// Person names, course and institution names.
        const NAME = Self::LETTERS.bits() | Self::SPACE.bits() | Self::PERIOD.bits();
        /// Boarding-house names: letters, digits, spaces, periods and commas.
        const TITLE = Self::NAME.bits() | Self::DIGITS.bits() | Self::COMMA.bits();
        /// Street addresses.
        const ADDRESS = Self::TITLE.bits() | Self::PUNCTUATION.bits();
        /// Bill descriptions: anything but digits.
        const DESCRIPTION = Self::NAME.bits() | Self::COMMA.bits() | Self::PUNCTUATION.bits();
    }
}

impl CharClass {
    /// Returns true if `c` belongs to one of the classes in this set.
    #[must_use]
    pub fn admits(self, c: char) -> bool {
        match c {
            'a'..='z' | 'A'..='Z' => self.contains(Self::LETTERS),
            '0'..='9' => self.contains(Self::DIGITS),
            ' ' => self.contains(Self::SPACE),
            '.' => self.contains(Self::PERIOD),
            ',' => self.contains(Self::COMMA),
            c if c.is_ascii_punctuation() => self.contains(Self::PUNCTUATION),
            _ => false,
        }
    }
}

/// The rule family a field follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Any printable character.
    FreeText,
    /// Letters and spaces, title-cased.
    LettersOnly,
    /// Title-cased text drawn from the given character classes.
    CapitalizedWords(CharClass),
    /// Digits only.
    DigitsOnly,
    /// Mobile number: 11 digits starting with `09`.
    PhoneNumber,
    /// Money: digits with at most one point and two decimals.
    DecimalAmount,
    /// A middle initial such as `M.`. Without `period_required`, a bare
    /// letter is also complete.
    SingleLetterInitial { period_required: bool },
    /// Family name: letters, spaces, one period; generational suffixes
    /// (`II` through `X`) are upper-cased.
    Surname,
    /// A value typed out from a fixed list of options, e.g. `Male`/`Female`.
    OneOf(&'static [&'static str]),
}

impl TextKind {
    /// Upper bound on value length implied by the kind itself.
    #[must_use]
    pub const fn inherent_max_length(&self) -> Option<usize> {
        match self {
            Self::PhoneNumber => Some(PHONE_NUMBER_LEN),
            Self::SingleLetterInitial { .. } => Some(2),
            _ => None,
        }
    }

    /// Short name used in logs and diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FreeText => "free-text",
            Self::LettersOnly => "letters-only",
            Self::CapitalizedWords(_) => "capitalized-words",
            Self::DigitsOnly => "digits-only",
            Self::PhoneNumber => "phone-number",
            Self::DecimalAmount => "decimal-amount",
            Self::SingleLetterInitial { .. } => "single-letter-initial",
            Self::Surname => "surname",
            Self::OneOf(_) => "one-of",
        }
    }
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length of a complete mobile number.
pub const PHONE_NUMBER_LEN: usize = 11;

/// Mandatory mobile number prefix.
pub const PHONE_NUMBER_PREFIX: &str = "09";

/// Post-processing applied to a value after each accepted insertion.
pub type Transform = fn(&str) -> String;

/// Static description of one input on a page.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: String,
    order: u32,
    kind: TextKind,
    max_length: Option<usize>,
    exact_length: Option<usize>,
    range: Option<RangeInclusive<u64>>,
    required: bool,
    transform: Option<Transform>,
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("kind", &self.kind)
            .field("max_length", &self.max_length)
            .field("exact_length", &self.exact_length)
            .field("range", &self.range)
            .field("required", &self.required)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

impl FieldDescriptor {
    /// Create a required field with no extra length limits.
    pub fn new(name: impl Into<String>, order: u32, kind: TextKind) -> Self {
        Self {
            name: name.into(),
            order,
            kind,
            max_length: None,
            exact_length: None,
            range: None,
            required: true,
            transform: None,
        }
    }

    /// Limit the value to `max` graphemes (builder).
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require exactly `len` graphemes at submission; also caps typing at `len`.
    #[must_use]
    pub fn exact_length(mut self, len: usize) -> Self {
        self.exact_length = Some(len);
        self.max_length = Some(self.max_length.map_or(len, |m| m.min(len)));
        self
    }

    /// Require a whole number within `range` at submission (builder).
    #[must_use]
    pub fn range(mut self, range: RangeInclusive<u64>) -> Self {
        self.range = Some(range);
        self
    }

    /// Mark the field as optional (builder).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach a post-insert transform (builder).
    #[must_use]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn kind(&self) -> TextKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn exact_len(&self) -> Option<usize> {
        self.exact_length
    }

    pub fn numeric_range(&self) -> Option<&RangeInclusive<u64>> {
        self.range.as_ref()
    }

    pub fn transform_fn(&self) -> Option<Transform> {
        self.transform
    }

    /// The tighter of the declared and kind-implied maximum lengths.
    #[must_use]
    pub fn effective_max_length(&self) -> Option<usize> {
        match (self.max_length, self.kind.inherent_max_length()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Errors raised when a page declares an inconsistent field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSetError {
    /// The page declared no fields.
    Empty,
    /// Two fields share a name.
    DuplicateName(String),
    /// Two fields share an order value.
    DuplicateOrder {
        order: u32,
        first: String,
        second: String,
    },
}

impl fmt::Display for FieldSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "field set is empty"),
            Self::DuplicateName(name) => write!(f, "duplicate field name '{name}'"),
            Self::DuplicateOrder {
                order,
                first,
                second,
            } => write!(
                f,
                "fields '{first}' and '{second}' share navigation order {order}"
            ),
        }
    }
}

impl std::error::Error for FieldSetError {}

/// The ordered, validated set of fields on one page.
///
/// Fields are kept sorted by `order`, so iteration order is navigation
/// order regardless of how the page listed them.
#[derive(Debug, Clone)]
pub struct FieldSet {
    fields: Vec<FieldDescriptor>,
}

impl FieldSet {
    /// Build a field set, rejecting empty lists, duplicate names and
    /// duplicate order values.
    pub fn new(mut fields: Vec<FieldDescriptor>) -> Result<Self, FieldSetError> {
        if fields.is_empty() {
            return Err(FieldSetError::Empty);
        }
        fields.sort_by_key(FieldDescriptor::order);
        for pair in fields.windows(2) {
            if pair[0].order == pair[1].order {
                return Err(FieldSetError::DuplicateOrder {
                    order: pair[0].order,
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(FieldSetError::DuplicateName(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in navigation order.
    pub fn order(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Iterate descriptors in navigation order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// The first field in navigation order.
    pub fn first(&self) -> &FieldDescriptor {
        // Non-empty by construction.
        &self.fields[0]
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Where `Enter` on `current` leads.
    pub fn advance(&self, current: &str) -> Option<Advance<'_>> {
        navigator::advance(current, &self.order())
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
