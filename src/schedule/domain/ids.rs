//! Identifier and validated scalar types for the schedule domain.

use super::ScheduleDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated funder natural key: two ASCII letters followed by six hex
/// digits, e.g. `BN0002E1`. The format rule is case-insensitive; the value
/// is stored exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BernieNumber(String);

impl BernieNumber {
    /// Expected total length: prefix plus hex digits.
    const LENGTH: usize = 8;

    /// Creates a validated bernie number.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::InvalidBernieNumber`] when the value
    /// is not exactly two ASCII letters followed by six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ScheduleDomainError> {
        let value = value.into();
        if !Self::is_valid(&value) {
            return Err(ScheduleDomainError::InvalidBernieNumber(value));
        }
        Ok(Self(value))
    }

    fn is_valid(value: &str) -> bool {
        value.len() == Self::LENGTH
            && value.chars().enumerate().all(|(index, character)| {
                if index < 2 {
                    character.is_ascii_alphabetic()
                } else {
                    character.is_ascii_hexdigit()
                }
            })
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BernieNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BernieNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated employer identification number: exactly nine ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ein(String);

impl Ein {
    /// Creates a validated EIN.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::InvalidEin`] when the value is not
    /// exactly nine ASCII digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ScheduleDomainError> {
        let value = value.into();
        if value.len() != 9 || !value.chars().all(|character| character.is_ascii_digit()) {
            return Err(ScheduleDomainError::InvalidEin(value));
        }
        Ok(Self(value))
    }

    /// Returns the EIN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ein {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Surrogate identifier for a raw status row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(i32);

impl StatusId {
    /// Creates a status identifier from a database value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Surrogate identifier for a development team member row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i32);

impl MemberId {
    /// Creates a member identifier from a database value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
