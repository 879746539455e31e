//! Row decomposer: translates raw writing-schedule rows into task
//! blueprints keyed by natural identifiers.
//!
//! Pure field mapping and type dispatch, no I/O. This is the only place
//! that knows both the source schema and the blueprint shapes; urgency and
//! workflow concerns live elsewhere.

use crate::schedule::domain::{
    LoiBlueprint, LoiStatus, ProposalBlueprint, ProposalStatus, ReminderBlueprint,
    ReportBlueprint, ReportStatus, ScheduleDomainError, TaskBlueprint, TaskCoreBlueprint,
    WritingScheduleRow, parse,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use thiserror::Error;

/// Funder natural key substituted when the source omits one. Degenerate
/// on purpose: the row still decomposes, and downstream validation
/// rejects the placeholder when an entity is built from it.
pub const UNKNOWN_FUNDER_ID: &str = "UNKNOWN";

/// Funder display name substituted when the source omits one.
pub const UNKNOWN_FUNDER_NAME: &str = "Unknown Funder";

/// Status text substituted when the source omits one.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Errors raised while decomposing a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecomposeError {
    /// The row carries no task identifier.
    #[error("row has no task identifier")]
    MissingTaskId,
    /// A blueprint invariant was violated, e.g. a negative proposal amount.
    #[error(transparent)]
    Domain(#[from] ScheduleDomainError),
}

/// Result type for decomposition.
pub type DecomposeResult<T> = Result<T, DecomposeError>;

/// Decomposes one raw row into task blueprints.
///
/// Most rows yield exactly one blueprint. A `Proposal & Report` row yields
/// two, sharing the row's task identifier; an unrecognised or missing type
/// tag yields a reminder so no row is silently dropped. Malformed dates
/// and amounts degrade to absent values; the only hard failures are a
/// missing task identifier and a blueprint invariant violation.
///
/// # Errors
///
/// Returns [`DecomposeError`] when the row has no task identifier or a
/// constructed blueprint violates a domain invariant.
pub fn decompose_row(
    row: &WritingScheduleRow,
    clock: &impl Clock,
) -> DecomposeResult<Vec<TaskBlueprint>> {
    if row.task_id.trim().is_empty() {
        return Err(DecomposeError::MissingTaskId);
    }

    let task_type = non_empty(row.task_type.as_deref());
    let blueprints = match task_type.as_deref() {
        Some("LOI") => vec![TaskBlueprint::Loi(to_loi(row, clock))],
        Some("Proposal") => vec![TaskBlueprint::Proposal(to_proposal(row, clock)?)],
        Some(tag @ ("Report" | "Final Report" | "Interim Report")) => {
            vec![TaskBlueprint::Report(to_report(row, tag, clock))]
        }
        // The only one-to-many case: one row backs both entities.
        Some("Proposal & Report") => vec![
            TaskBlueprint::Proposal(to_proposal(row, clock)?),
            TaskBlueprint::Report(to_report(row, "Report", clock)),
        ],
        // Reminders and unknown future tags degrade to a reminder rather
        // than failing the batch or dropping the row.
        _ => vec![TaskBlueprint::Reminder(to_reminder(row, clock))],
    };
    Ok(blueprints)
}

fn to_core(
    row: &WritingScheduleRow,
    task_type: &str,
    deadline_field: Option<&str>,
    clock: &impl Clock,
) -> TaskCoreBlueprint {
    let (deadline, deadline_defaulted) = match parse::parse_date(deadline_field) {
        Some(date) => (start_of_day_utc(date), false),
        None => (clock.utc(), true),
    };
    TaskCoreBlueprint {
        task_id: row.task_id.trim().to_owned(),
        task_type: task_type.to_owned(),
        bernie_number: non_empty(row.bernie_identifier.as_deref())
            .unwrap_or_else(|| UNKNOWN_FUNDER_ID.to_owned()),
        funder_name: non_empty(row.funder.as_deref())
            .unwrap_or_else(|| UNKNOWN_FUNDER_NAME.to_owned()),
        status_text: non_empty(row.status.as_deref())
            .unwrap_or_else(|| UNKNOWN_STATUS.to_owned()),
        owner_name: non_empty(row.owner.as_deref()),
        deadline,
        deadline_defaulted,
        last_modified: last_modified(row, clock),
        fiscal_year: non_empty(row.fiscal_year.as_deref()),
        program_area: non_empty(row.area.as_deref()),
        initiative: non_empty(row.initiative.as_deref()),
        opportunity_id: non_empty(row.opportunity.as_deref()),
    }
}

fn to_loi(row: &WritingScheduleRow, clock: &impl Clock) -> LoiBlueprint {
    LoiBlueprint {
        core: to_core(row, "LOI", row.deadline.as_deref(), clock),
        status: LoiStatus::from_schedule_status(row.status.as_deref()),
        notification_date: parse::parse_date(row.notification_date.as_deref()),
        amount_requested: parse::parse_amount(row.amount.as_deref()),
        related_proposal_id: None,
        dev_team_notes: row.dev_team_notes.clone(),
    }
}

fn to_proposal(
    row: &WritingScheduleRow,
    clock: &impl Clock,
) -> Result<ProposalBlueprint, ScheduleDomainError> {
    ProposalBlueprint {
        core: to_core(row, "Proposal", row.deadline.as_deref(), clock),
        status: ProposalStatus::from_schedule_status(row.status.as_deref()),
        // Required for proposals: an omitted amount becomes exact zero.
        amount_requested: parse::parse_amount(row.amount.as_deref()).unwrap_or(Decimal::ZERO),
        award_amount: parse::parse_amount(row.award.as_deref()),
        // Not tracked in the writing schedule.
        submission_date: None,
        notification_date: parse::parse_date(row.notification_date.as_deref()),
        grant_start_date: parse::parse_date(row.grant_start_date.as_deref()),
        grant_end_date: parse::parse_date(row.grant_end_date.as_deref()),
        communities: row.communities.clone(),
        members_funded: row.members_funded.clone(),
        model_funded: row.model_funded.clone(),
        dev_team_notes: row.dev_team_notes.clone(),
        grant_goals: row.grant_goals.clone(),
    }
    .validated()
}

fn to_report(row: &WritingScheduleRow, report_type: &str, clock: &impl Clock) -> ReportBlueprint {
    ReportBlueprint {
        // Reports are due on the reporting date, not the application
        // deadline.
        core: to_core(row, report_type, row.reports_due.as_deref(), clock),
        status: ReportStatus::from_schedule_status(row.status.as_deref()),
        report_type: report_type.to_owned(),
        related_proposal_id: None,
        submission_date: None,
        reporting_period_start: None,
        reporting_period_end: None,
        acknowledgment_needs: row.acknowledgment_needs.clone(),
        dev_team_notes: row.dev_team_notes.clone(),
    }
}

fn to_reminder(row: &WritingScheduleRow, clock: &impl Clock) -> ReminderBlueprint {
    let task_type = non_empty(row.task_type.as_deref()).unwrap_or_else(|| "Reminder".to_owned());
    ReminderBlueprint {
        core: to_core(row, &task_type, row.deadline.as_deref(), clock),
        reminder_note: row.dev_team_notes.clone(),
    }
}

fn last_modified(row: &WritingScheduleRow, clock: &impl Clock) -> DateTime<Utc> {
    if let Some(updated_at) = row.updated_at.as_deref()
        && let Ok(parsed) = DateTime::parse_from_rfc3339(updated_at.trim())
    {
        return parsed.with_timezone(&Utc);
    }
    parse::parse_date(row.last_modified.as_deref())
        .map_or_else(|| clock.utc(), start_of_day_utc)
}

fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
