//! Error types for schedule domain validation and parsing.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned while constructing schedule domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleDomainError {
    /// The bernie number does not follow the `BN` + six hex digits format.
    #[error("invalid bernie number '{0}', expected two letters followed by six hex digits")]
    InvalidBernieNumber(String),

    /// The funder canonical name is empty after trimming.
    #[error("funder canonical name must not be empty")]
    EmptyCanonicalName,

    /// The EIN is not a nine-digit numeric string.
    #[error("invalid EIN '{0}', expected nine digits")]
    InvalidEin(String),

    /// The team member name is empty after trimming.
    #[error("team member name must not be empty")]
    EmptyMemberName,

    /// The team member email lacks an `@` separator.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A proposal carries a negative requested amount.
    #[error("proposal requested amount must not be negative, got {0}")]
    NegativeProposalAmount(Decimal),
}

/// Error returned while parsing status vocabulary values from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status value: {0}")]
pub struct ParseStatusError(pub String);
