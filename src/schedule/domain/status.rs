//! Raw status records and per-kind status vocabularies.
//!
//! The writing schedule carries human-authored, numbered status strings
//! such as `"1. Awarded"` or `"3. LOI Submitted"`. Each task kind maps
//! those strings onto a small domain vocabulary via case-sensitive keyword
//! containment checked in a fixed priority order; the first match wins.
//! The order is load-bearing for strings containing several keywords and
//! is preserved exactly as the source system established it.

use super::{ParseStatusError, StatusId};
use serde::{Deserialize, Serialize};

/// Source-system tag for rows ingested from the writing schedule.
pub const WRITING_SCHEDULE_SOURCE: &str = "writing_schedule";

/// A raw status row: surrogate id plus the (text, source system) natural
/// key. Uniqueness is per pair, so identical text from two source systems
/// is never conflated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatus {
    id: StatusId,
    status_text: String,
    source_system: String,
}

impl RawStatus {
    /// Creates a raw status record.
    #[must_use]
    pub fn new(
        id: StatusId,
        status_text: impl Into<String>,
        source_system: impl Into<String>,
    ) -> Self {
        Self {
            id,
            status_text: status_text.into(),
            source_system: source_system.into(),
        }
    }

    /// Returns the surrogate identifier.
    #[must_use]
    pub const fn id(&self) -> StatusId {
        self.id
    }

    /// Returns the raw status text.
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Returns the source-system tag.
    #[must_use]
    pub fn source_system(&self) -> &str {
        &self.source_system
    }
}

/// Letter-of-intent workflow vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoiStatus {
    /// Being drafted, planned, or researched.
    Active,
    /// Submitted and awaiting the funder's decision.
    Submitted,
    /// Funder invited a full proposal.
    Invited,
    /// Not invited to apply.
    Declined,
}

impl LoiStatus {
    /// Classifies raw writing-schedule status text.
    #[must_use]
    pub fn from_schedule_status(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::Active;
        };
        if status.contains("LOI Submitted") {
            Self::Submitted
        } else if status.contains("Awarded") {
            // Awarded after an LOI means invited to submit a full proposal.
            Self::Invited
        } else if status.contains("Denied") || status.contains("Withdrawn") {
            Self::Declined
        } else {
            Self::Active
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Submitted => "submitted",
            Self::Invited => "invited",
            Self::Declined => "declined",
        }
    }
}

impl TryFrom<&str> for LoiStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "submitted" => Ok(Self::Submitted),
            "invited" => Ok(Self::Invited),
            "declined" => Ok(Self::Declined),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

/// Proposal workflow vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Being drafted, planned, or researched.
    Active,
    /// Application submitted and awaiting a decision.
    Submitted,
    /// Grant awarded.
    Awarded,
    /// Proposal denied.
    Denied,
    /// Withdrawn or forgone before a decision.
    Withdrawn,
}

impl ProposalStatus {
    /// Classifies raw writing-schedule status text.
    #[must_use]
    pub fn from_schedule_status(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::Active;
        };
        if status.contains("Awarded") {
            Self::Awarded
        } else if status.contains("Application Submitted") {
            Self::Submitted
        } else if status.contains("Denied") {
            Self::Denied
        } else if status.contains("Withdrawn") || status.contains("Forgone") {
            Self::Withdrawn
        } else {
            Self::Active
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Submitted => "submitted",
            Self::Awarded => "awarded",
            Self::Denied => "denied",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl TryFrom<&str> for ProposalStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "submitted" => Ok(Self::Submitted),
            "awarded" => Ok(Self::Awarded),
            "denied" => Ok(Self::Denied),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

/// Report workflow vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Being drafted or not yet due.
    Active,
    /// Submitted to the funder.
    Submitted,
    /// Closed without a submission, e.g. the grant was denied.
    Completed,
}

impl ReportStatus {
    /// Classifies raw writing-schedule status text.
    #[must_use]
    pub fn from_schedule_status(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::Active;
        };
        if status.contains("Report Submitted") || status.contains("Follow-Up Complete") {
            Self::Submitted
        } else if status.contains("Denied") || status.contains("Withdrawn") {
            Self::Completed
        } else {
            Self::Active
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Submitted => "submitted",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for ReportStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "submitted" => Ok(Self::Submitted),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}
