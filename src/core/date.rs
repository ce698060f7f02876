//! Date format validation
//!
//! Dates in the ledger are plain `dd/mm/yyyy` strings. Validation checks the
//! shape only: exactly 10 characters with `/` at positions 2 and 5. The
//! digit content is deliberately not checked, so a string like `ab/cd/efgh`
//! passes. This matches the historical file format, which has never stored
//! anything stricter. No date arithmetic is performed anywhere in the system
//! except the day/month extraction used by the doubling predicate.

use crate::types::FineError;

/// Shown in prompts and error messages
pub const FORMAT_HINT: &str = "dd/mm/yyyy";

/// Check whether `input` has the `dd/mm/yyyy` shape
///
/// True iff the input is exactly 10 characters long and the characters at
/// positions 2 and 5 are `/`. Positions are counted in characters, not
/// bytes, so multi-byte input is measured the same way a user reads it.
pub fn is_valid(input: &str) -> bool {
    let mut chars = input.chars();
    input.chars().count() == 10 && chars.nth(2) == Some('/') && chars.nth(2) == Some('/')
}

/// Validate `input`, handing back the raw string on success
///
/// No parsing into a date object happens here or anywhere downstream;
/// callers store the validated text as-is.
pub fn validate(input: &str) -> Result<&str, FineError> {
    if is_valid(input) {
        Ok(input)
    } else {
        Err(FineError::invalid_date(input))
    }
}

/// Extract the day and month components of a `dd/mm/yyyy` string
///
/// Returns `None` when the `dd` or `mm` slice is not a number or does not
/// fall on character boundaries. Because validation does not check digits,
/// a stored date can fail extraction; callers treat that as "no usable
/// date components" rather than an error.
pub fn day_month(input: &str) -> Option<(u32, u32)> {
    let day = input.get(0..2)?.parse().ok()?;
    let month = input.get(3..5)?.parse().ok()?;
    Some((day, month))
}
