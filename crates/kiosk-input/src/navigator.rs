#![forbid(unsafe_code)]

//! Enter-key navigation through a page's fields.
//!
//! Navigation is forward-only: `Enter` moves to the next field in page
//! order, and `Enter` on the last field asks the page to submit. There is no
//! wraparound and no way to step backwards with `Enter`.

/// What `Enter` on the active field resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance<'a> {
    /// Move focus to this field.
    Next(&'a str),
    /// The active field was the last one; submit the form.
    Submit,
}

impl Advance<'_> {
    /// Returns true if this step submits the form.
    #[must_use]
    pub const fn is_submit(&self) -> bool {
        matches!(self, Self::Submit)
    }
}

/// Resolve `Enter` on `current` against the page's field order.
///
/// Returns `None` when `current` is not part of `order`; the caller treats
/// that as a no-op.
pub fn advance<'a>(current: &str, order: &[&'a str]) -> Option<Advance<'a>> {
    let position = order.iter().position(|name| *name == current)?;
    Some(match order.get(position + 1) {
        Some(next) => Advance::Next(next),
        None => Advance::Submit,
    })
}
