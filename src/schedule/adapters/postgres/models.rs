//! Diesel row models for schedule persistence.

use super::schema::{
    dev_team_members, funders, lois, proposals, raw_statuses, reminders, reports, scheduled_tasks,
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query and upsert model for funder reference records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = funders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FunderRow {
    /// Funder natural key.
    pub bernie_number: String,
    /// Preferred display name.
    pub canonical_name: String,
    /// Known name variants as a JSON array of strings.
    pub aliases: Value,
    /// Employer identification number, when known.
    pub ein: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query model for raw status records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = raw_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RawStatusRow {
    /// Surrogate identifier.
    pub id: i32,
    /// Status text exactly as the source spelled it.
    pub status_text: String,
    /// Source-system tag.
    pub source_system: String,
}

/// Insert model for raw status records; the id is database-assigned.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = raw_statuses)]
pub struct NewRawStatusRow {
    /// Status text exactly as the source spelled it.
    pub status_text: String,
    /// Source-system tag.
    pub source_system: String,
}

/// Query model for team member records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dev_team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DevTeamMemberRow {
    /// Surrogate identifier.
    pub id: i32,
    /// Full name as the source spelled it.
    pub full_name: String,
    /// Contact email, when known.
    pub email: Option<String>,
    /// Role within the team, when known.
    pub role: Option<String>,
}

/// Insert model for team member records; the id is database-assigned.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dev_team_members)]
pub struct NewDevTeamMemberRow {
    /// Full name as the source spelled it.
    pub full_name: String,
    /// Contact email, when known.
    pub email: Option<String>,
    /// Role within the team, when known.
    pub role: Option<String>,
}

/// Query and upsert model for the core scheduling row.
///
/// `treat_none_as_null` keeps re-saves last-write-wins: a field cleared in
/// the source clears the stored column instead of being skipped.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = scheduled_tasks)]
#[diesel(primary_key(task_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ScheduledTaskRow {
    /// External task identifier.
    pub task_id: String,
    /// Variant discriminator selecting the satellite table.
    pub kind: String,
    /// Raw type tag as the source spelled it.
    pub task_type: String,
    /// Foreign key to the funder.
    pub bernie_number: String,
    /// Foreign key to the raw status row.
    pub status_id: i32,
    /// Foreign key to the owning team member, when assigned.
    pub owner_id: Option<i32>,
    /// When the task is due.
    pub deadline: DateTime<Utc>,
    /// Whether the deadline was substituted during ingestion.
    pub deadline_defaulted: bool,
    /// Last modification timestamp from the source.
    pub last_modified_in_source: DateTime<Utc>,
    /// Fiscal year tag.
    pub fiscal_year: Option<String>,
    /// Program area.
    pub program_area: Option<String>,
    /// Initiative name.
    pub initiative: Option<String>,
    /// Link to an opportunity record.
    pub opportunity_id: Option<String>,
}

/// Query and upsert model for letter-of-intent satellite rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = lois)]
#[diesel(primary_key(task_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct LoiRow {
    /// External task identifier, shared with the core row.
    pub task_id: String,
    /// Classified workflow status.
    pub status: String,
    /// When a decision is expected or was received.
    pub notification_date: Option<NaiveDate>,
    /// Tentative requested amount as exact decimal text.
    pub amount_requested: Option<String>,
    /// Task id of the follow-on proposal.
    pub related_proposal_id: Option<String>,
    /// Internal development notes.
    pub dev_team_notes: Option<String>,
}

/// Query and upsert model for proposal satellite rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = proposals)]
#[diesel(primary_key(task_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ProposalRow {
    /// External task identifier, shared with the core row.
    pub task_id: String,
    /// Classified workflow status.
    pub status: String,
    /// Requested amount as exact decimal text.
    pub amount_requested: String,
    /// Awarded amount as exact decimal text.
    pub award_amount: Option<String>,
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

/// Query and upsert model for report satellite rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = reports)]
#[diesel(primary_key(task_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ReportRow {
    /// External task identifier, shared with the core row.
    pub task_id: String,
    /// Classified workflow status.
    pub status: String,
    /// Source type tag preserved verbatim.
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

/// Query and upsert model for reminder satellite rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = reminders)]
#[diesel(primary_key(task_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ReminderRow {
    /// External task identifier, shared with the core row.
    pub task_id: String,
    /// What this reminder is about.
    pub reminder_note: Option<String>,
}
