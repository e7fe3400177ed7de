#![forbid(unsafe_code)]

//! Field sets of the kiosk's data-entry pages.
//!
//! Field names match the keys the backend expects, and the `order` of each
//! descriptor is the order `Enter` walks through the page.

use std::fmt;
use std::ops::RangeInclusive;

use crate::field::{CharClass, FieldDescriptor, FieldSet, FieldSetError, TextKind};
use crate::values::{Amount, FormValues};

/// Options for the boarder's gender field.
pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];

/// Ages a boarder may register with.
pub const BOARDER_AGE: RangeInclusive<u64> = 13..=65;

/// Length of a login passcode.
pub const PASSCODE_LEN: usize = 4;

/// A data-entry page of the kiosk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    OwnerRegistration,
    BoardingHouseRegistration,
    BoarderRegistration,
    GuardianRegistration,
    /// Room billing with `add_ons` description/amount pairs.
    BillRegistration { add_ons: usize },
    Login,
}

impl Page {
    /// Every page, with a bill page carrying no add-ons.
    pub const fn all() -> [Page; 6] {
        [
            Self::OwnerRegistration,
            Self::BoardingHouseRegistration,
            Self::BoarderRegistration,
            Self::GuardianRegistration,
            Self::BillRegistration { add_ons: 0 },
            Self::Login,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OwnerRegistration => "owner",
            Self::BoardingHouseRegistration => "boarding-house",
            Self::BoarderRegistration => "boarder",
            Self::GuardianRegistration => "guardian",
            Self::BillRegistration { .. } => "bill",
            Self::Login => "login",
        }
    }

    /// Parse a page name as printed by [`Page::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|page| page.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// The page's fields in navigation order.
    pub fn field_set(&self) -> Result<FieldSet, FieldSetError> {
        FieldSet::new(self.descriptors())
    }

    fn descriptors(&self) -> Vec<FieldDescriptor> {
        use TextKind::*;
        match *self {
            Self::OwnerRegistration => vec![
                FieldDescriptor::new("ownerfirstname", 0, LettersOnly),
                FieldDescriptor::new("ownerlastname", 1, Surname),
                FieldDescriptor::new("owneraddress", 2, CapitalizedWords(CharClass::ADDRESS)),
                FieldDescriptor::new("ownercontact", 3, PhoneNumber),
            ],
            Self::BoardingHouseRegistration => vec![
                FieldDescriptor::new("bhname", 0, CapitalizedWords(CharClass::TITLE)),
                FieldDescriptor::new("bhaddress", 1, CapitalizedWords(CharClass::ADDRESS)),
                FieldDescriptor::new("bhrooms", 2, DigitsOnly).max_length(3),
            ],
            Self::BoarderRegistration => vec![
                FieldDescriptor::new("boarderfirstname", 0, LettersOnly),
                FieldDescriptor::new(
                    "boardermiddlename",
                    1,
                    SingleLetterInitial {
                        period_required: false,
                    },
                )
                .optional(),
                FieldDescriptor::new("boarderlastname", 2, Surname),
                FieldDescriptor::new("boardergender", 3, OneOf(GENDER_OPTIONS)),
                FieldDescriptor::new("boarderage", 4, DigitsOnly)
                    .max_length(2)
                    .range(BOARDER_AGE),
                FieldDescriptor::new("boarderaddress", 5, CapitalizedWords(CharClass::ADDRESS)),
                FieldDescriptor::new("boardercontactnumber", 6, PhoneNumber),
                FieldDescriptor::new(
                    "boardercourse_profession",
                    7,
                    CapitalizedWords(CharClass::NAME),
                ),
                FieldDescriptor::new("boarderinstitution", 8, CapitalizedWords(CharClass::NAME)),
            ],
            Self::GuardianRegistration => vec![
                FieldDescriptor::new("guardianfirstname", 0, LettersOnly),
                FieldDescriptor::new(
                    "guardianmiddlename",
                    1,
                    SingleLetterInitial {
                        period_required: true,
                    },
                ),
                FieldDescriptor::new("guardianlastname", 2, Surname),
                FieldDescriptor::new("guardianaddress", 3, CapitalizedWords(CharClass::ADDRESS)),
                FieldDescriptor::new("guardiancontactnumber", 4, PhoneNumber),
                FieldDescriptor::new("relationship", 5, LettersOnly),
            ],
            Self::BillRegistration { add_ons } => {
                let mut fields = vec![FieldDescriptor::new("monthlyRent", 0, DecimalAmount)];
                let mut order = 1;
                for i in 0..add_ons {
                    fields.push(FieldDescriptor::new(
                        add_on_description(i),
                        order,
                        CapitalizedWords(CharClass::DESCRIPTION),
                    ));
                    fields.push(FieldDescriptor::new(add_on_amount(i), order + 1, DecimalAmount));
                    order += 2;
                }
                fields.push(FieldDescriptor::new("advancePayment", order, DecimalAmount).optional());
                fields
            }
            Self::Login => vec![
                FieldDescriptor::new("passcode", 0, DigitsOnly).exact_length(PASSCODE_LEN),
            ],
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name of the `index`th add-on description.
pub fn add_on_description(index: usize) -> String {
    format!("addOnDescription-{index}")
}

/// Field name of the `index`th add-on amount.
pub fn add_on_amount(index: usize) -> String {
    format!("addOnAmount-{index}")
}

/// Money due on a bill page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillTotals {
    /// Rent plus every add-on.
    pub monthly_due: Amount,
    /// Monthly due plus advance payment.
    pub initial_payment: Amount,
}

impl BillTotals {
    /// Sum a bill page's amounts. Missing or partial amounts count as zero.
    pub fn compute(values: &FormValues, add_ons: usize) -> Self {
        let amount = |name: &str| values.amount(name).unwrap_or_default();
        let monthly_due = (0..add_ons)
            .map(|i| amount(&add_on_amount(i)))
            .fold(amount("monthlyRent"), Amount::saturating_add);
        Self {
            monthly_due,
            initial_payment: monthly_due.saturating_add(amount("advancePayment")),
        }
    }

    /// A bill can be saved only when something is owed.
    pub fn is_payable(&self) -> bool {
        self.monthly_due != Amount::ZERO && self.initial_payment != Amount::ZERO
    }
}
