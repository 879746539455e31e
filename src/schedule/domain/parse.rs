//! Tolerant parsing helpers for external text fields.
//!
//! Source data is assumed messy: a malformed date or amount is downgraded
//! to an absent value rather than failing the row. Invariant violations are
//! a separate concern handled by entity constructors.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Parses a strict `YYYY-MM-DD` date string.
///
/// Missing, empty, and malformed input all yield `None`.
#[must_use]
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Parses a numeric string into an exact decimal amount.
///
/// Decimal, not float, so currency values survive round-trips without
/// rounding drift. Missing, empty, and non-numeric input all yield `None`.
#[must_use]
pub fn parse_amount(value: Option<&str>) -> Option<Decimal> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Decimal>().ok()
}
