//! Scheduled task entities with resolved foreign keys.
//!
//! Each concrete entity composes a shared [`TaskCore`] rather than
//! inheriting from a base type, and the closed [`ScheduledTask`] sum type
//! lets consumers pattern-match on the variant.

use super::{
    BernieNumber, LoiStatus, MemberId, ProposalStatus, ReportStatus, ScheduleDomainError, StatusId,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four task kinds the schedule distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Letter of intent: a preliminary funding inquiry.
    Loi,
    /// Full grant application.
    Proposal,
    /// Grant performance report.
    Report,
    /// Lightweight reminder, also the fallback for unknown type tags.
    Reminder,
}

impl TaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loi => "LOI",
            Self::Proposal => "Proposal",
            Self::Report => "Report",
            Self::Reminder => "Reminder",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Core scheduling data shared by every task variant, carrying resolved
/// surrogate identifiers in place of natural keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCore {
    /// Unique identifier from the external system.
    pub task_id: String,
    /// Raw type tag as the source spelled it, e.g. `Final Report`.
    pub task_type: String,
    /// Foreign key to the funder; the natural key doubles as the
    /// primary key, so no surrogate is minted.
    pub bernie_number: BernieNumber,
    /// Resolved foreign key into the raw status table.
    pub status_id: StatusId,
    /// Resolved foreign key to the owning team member, when assigned.
    pub owner_id: Option<MemberId>,
    /// When the task is due.
    pub deadline: DateTime<Utc>,
    /// Whether the deadline was substituted with "now" because the source
    /// value was missing or unparseable. Affects urgency calculations, so
    /// the substitution is recorded rather than erased.
    pub deadline_defaulted: bool,
    /// Last modification timestamp from the source.
    pub last_modified: DateTime<Utc>,
    /// Fiscal year tag, e.g. `FY25`.
    pub fiscal_year: Option<String>,
    /// Program area.
    pub program_area: Option<String>,
    /// Initiative name.
    pub initiative: Option<String>,
    /// Link to an opportunity record, when one exists.
    pub opportunity_id: Option<String>,
}

/// Letter of intent: a preliminary, often tentative funding inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loi {
    /// Shared scheduling core.
    pub core: TaskCore,
    /// Domain workflow status classified from the raw status text.
    pub status: LoiStatus,
    /// When a decision is expected or was received.
    pub notification_date: Option<NaiveDate>,
    /// Tentative requested amount.
    pub amount_requested: Option<Decimal>,
    /// Task id of the follow-on proposal, if the LOI led to one.
    pub related_proposal_id: Option<String>,
    /// Internal development notes.
    pub dev_team_notes: Option<String>,
}

/// Full grant application. The requested amount is required and never
/// negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Shared scheduling core.
    pub core: TaskCore,
    /// Domain workflow status classified from the raw status text.
    pub status: ProposalStatus,
    /// Requested amount; required for proposals.
    pub amount_requested: Decimal,
    /// Awarded amount, once a decision arrives.
    pub award_amount: Option<Decimal>,
    /// When the application was submitted.
    pub submission_date: Option<NaiveDate>,
    /// When the funding decision was received.
    pub notification_date: Option<NaiveDate>,
    /// Grant period start.
    pub grant_start_date: Option<NaiveDate>,
    /// Grant period end.
    pub grant_end_date: Option<NaiveDate>,
    /// Communities served.
    pub communities: Option<String>,
    /// Team members supported by the funding.
    pub members_funded: Option<String>,
    /// Business model or approach funded.
    pub model_funded: Option<String>,
    /// Internal development notes.
    pub dev_team_notes: Option<String>,
    /// Goals for the grant.
    pub grant_goals: Option<String>,
}

impl Proposal {
    /// Validates the requested-amount invariant, consuming and returning
    /// the proposal so construction sites read as one expression.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::NegativeProposalAmount`] when the
    /// requested amount is negative.
    pub fn validated(self) -> Result<Self, ScheduleDomainError> {
        if self.amount_requested < Decimal::ZERO {
            return Err(ScheduleDomainError::NegativeProposalAmount(
                self.amount_requested,
            ));
        }
        Ok(self)
    }
}

/// Grant performance report. Reports document work already funded, so
/// they carry no monetary fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Shared scheduling core.
    pub core: TaskCore,
    /// Domain workflow status classified from the raw status text.
    pub status: ReportStatus,
    /// Source type tag preserved verbatim: `Report`, `Final Report`,
    /// `Interim Report`.
    pub report_type: String,
    /// Task id of the proposal being reported on.
    pub related_proposal_id: Option<String>,
    /// When the report was submitted.
    pub submission_date: Option<NaiveDate>,
    /// Reporting period start.
    pub reporting_period_start: Option<NaiveDate>,
    /// Reporting period end.
    pub reporting_period_end: Option<NaiveDate>,
    /// Acknowledgment requirements.
    pub acknowledgment_needs: Option<String>,
    /// Internal development notes.
    pub dev_team_notes: Option<String>,
}

/// Lightweight scheduled task for anything that is not an LOI, proposal,
/// or report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Shared scheduling core.
    pub core: TaskCore,
    /// What this reminder is about.
    pub reminder_note: Option<String>,
}

/// Closed sum over the four task variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduledTask {
    /// Letter of intent.
    Loi(Loi),
    /// Grant proposal.
    Proposal(Proposal),
    /// Grant report.
    Report(Report),
    /// Reminder or unrecognised task.
    Reminder(Reminder),
}

impl ScheduledTask {
    /// Returns the shared scheduling core.
    #[must_use]
    pub const fn core(&self) -> &TaskCore {
        match self {
            Self::Loi(loi) => &loi.core,
            Self::Proposal(proposal) => &proposal.core,
            Self::Report(report) => &report.core,
            Self::Reminder(reminder) => &reminder.core,
        }
    }

    /// Returns the external task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.core().task_id
    }

    /// Returns the task kind matching the variant tag.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        match self {
            Self::Loi(_) => TaskKind::Loi,
            Self::Proposal(_) => TaskKind::Proposal,
            Self::Report(_) => TaskKind::Report,
            Self::Reminder(_) => TaskKind::Reminder,
        }
    }

    /// Returns the resolved status identifier.
    #[must_use]
    pub const fn status_id(&self) -> StatusId {
        self.core().status_id
    }

    /// Returns the task deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.core().deadline
    }
}
