//! Task blueprints: the intermediate representation between decomposition
//! and foreign-key resolution.
//!
//! Blueprints carry natural keys (funder identifier, raw status text,
//! owner name) exactly as the source spelled them. They hold no surrogate
//! keys and make no storage calls; the orchestrator resolves them into
//! entities.

use super::{LoiStatus, ProposalStatus, ReportStatus, ScheduleDomainError, TaskKind};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Common blueprint data shared by every task variant, keyed by natural
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCoreBlueprint {
    /// Unique identifier from the external system.
    pub task_id: String,
    /// Raw type tag as the source spelled it.
    pub task_type: String,
    /// Funder natural key, unvalidated at this stage; the literal
    /// `UNKNOWN` stands in when the source omits it.
    pub bernie_number: String,
    /// Funder display name as the source spelled it.
    pub funder_name: String,
    /// Raw status text; resolves to a surrogate status id downstream.
    pub status_text: String,
    /// Owner name; resolves to a surrogate member id downstream. Absent
    /// means no assignment, never a placeholder.
    pub owner_name: Option<String>,
    /// When the task is due; defaults to "now" when the source value is
    /// missing or unparseable.
    pub deadline: DateTime<Utc>,
    /// Whether the deadline was substituted with "now".
    pub deadline_defaulted: bool,
    /// Last modification timestamp; also defaults to "now".
    pub last_modified: DateTime<Utc>,
    /// Fiscal year tag.
    pub fiscal_year: Option<String>,
    /// Program area.
    pub program_area: Option<String>,
    /// Initiative name.
    pub initiative: Option<String>,
    /// Link to an opportunity record, when one exists.
    pub opportunity_id: Option<String>,
}

/// Blueprint for a letter of intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoiBlueprint {
    /// Shared blueprint core.
    pub core: TaskCoreBlueprint,
    /// Classified workflow status.
    pub status: LoiStatus,
    /// When a decision is expected or was received.
    pub notification_date: Option<NaiveDate>,
    /// Tentative requested amount.
    pub amount_requested: Option<Decimal>,
    /// Task id of the follow-on proposal, if known.
    pub related_proposal_id: Option<String>,
    /// Internal development notes.
    pub dev_team_notes: Option<String>,
}

/// Blueprint for a grant proposal. The requested amount is required; the
/// decomposer substitutes exact zero when the source omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalBlueprint {
    /// Shared blueprint core.
    pub core: TaskCoreBlueprint,
    /// Classified workflow status.
    pub status: ProposalStatus,
    /// Requested amount; never negative once validated.
    pub amount_requested: Decimal,
    /// Awarded amount, once a decision arrives.
    pub award_amount: Option<Decimal>,
    /// When the application was submitted; the writing schedule does not
    /// track this, so the decomposer never populates it.
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

impl ProposalBlueprint {
    /// Validates the requested-amount invariant at construction time.
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

/// Blueprint for a grant report. No monetary fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBlueprint {
    /// Shared blueprint core.
    pub core: TaskCoreBlueprint,
    /// Classified workflow status.
    pub status: ReportStatus,
    /// Source type tag preserved verbatim.
    pub report_type: String,
    /// Task id of the proposal being reported on.
    pub related_proposal_id: Option<String>,
    /// When the report was submitted; not tracked upstream.
    pub submission_date: Option<NaiveDate>,
    /// Reporting period start; not tracked upstream.
    pub reporting_period_start: Option<NaiveDate>,
    /// Reporting period end; not tracked upstream.
    pub reporting_period_end: Option<NaiveDate>,
    /// Acknowledgment requirements.
    pub acknowledgment_needs: Option<String>,
    /// Internal development notes.
    pub dev_team_notes: Option<String>,
}

/// Blueprint for a reminder, the universal fallback for unknown type tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderBlueprint {
    /// Shared blueprint core.
    pub core: TaskCoreBlueprint,
    /// What this reminder is about.
    pub reminder_note: Option<String>,
}

/// Closed sum over the four blueprint variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskBlueprint {
    /// Letter-of-intent blueprint.
    Loi(LoiBlueprint),
    /// Proposal blueprint.
    Proposal(ProposalBlueprint),
    /// Report blueprint.
    Report(ReportBlueprint),
    /// Reminder blueprint.
    Reminder(ReminderBlueprint),
}

impl TaskBlueprint {
    /// Returns the shared blueprint core.
    #[must_use]
    pub const fn core(&self) -> &TaskCoreBlueprint {
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
}
