//! Raw writing-schedule row as the external tabular store provides it.

use serde::{Deserialize, Serialize};

/// One row from the writing-schedule source table.
///
/// A typed data bag with no validation, parsing, or business logic: dates
/// arrive as `YYYY-MM-DD` text, amounts as numeric strings, and only
/// `task_id` is guaranteed present. The decomposer is the first layer that
/// interprets any of these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingScheduleRow {
    /// Unique task identifier, e.g. `DOBBFD-GA25E-NSO-LOI-240830`.
    pub task_id: String,

    /// Foundation or organisation name.
    pub funder: Option<String>,
    /// Specific program or opportunity name.
    pub opportunity: Option<String>,
    /// Funder natural key in bernie-number format.
    pub bernie_identifier: Option<String>,
    /// Person responsible or lead.
    pub short_name: Option<String>,

    /// Task type tag: `Proposal`, `LOI`, `Report`, `Final Report`, etc.
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    /// Numbered workflow status, e.g. `1. Awarded`.
    pub status: Option<String>,

    /// Requested amount as a numeric string, e.g. `100000.0`.
    pub amount: Option<String>,
    /// Awarded amount as a numeric string, if granted.
    pub award: Option<String>,

    /// Application or submission deadline, `YYYY-MM-DD`.
    pub deadline: Option<String>,
    /// When the funding decision was received, `YYYY-MM-DD`.
    pub notification_date: Option<String>,
    /// Project start date, `YYYY-MM-DD`.
    pub grant_start_date: Option<String>,
    /// Project end date, `YYYY-MM-DD`.
    pub grant_end_date: Option<String>,
    /// Report due date, `YYYY-MM-DD`.
    pub reports_due: Option<String>,
    /// Last modification date, `YYYY-MM-DD`.
    pub last_modified: Option<String>,

    /// Fiscal year tag, e.g. `FY25`.
    pub fiscal_year: Option<String>,
    /// Program area.
    pub area: Option<String>,
    /// Initiative name.
    pub initiative: Option<String>,
    /// Two-letter geographic state code.
    pub state: Option<String>,
    /// Communities served.
    pub communities: Option<String>,

    /// Goals for the grant.
    pub grant_goals: Option<String>,
    /// Internal development notes.
    pub dev_team_notes: Option<String>,
    /// Acknowledgment requirements.
    pub acknowledgment_needs: Option<String>,
    /// Team members supported by the funding.
    pub members_funded: Option<String>,
    /// Business model or approach funded.
    pub model_funded: Option<String>,

    /// External CRM account reference.
    pub crm_account: Option<String>,
    /// Assigned owner or responsible party.
    pub owner: Option<String>,

    /// Month categorisation.
    pub month: Option<String>,
    /// Recent pledge information.
    pub recent_pledge: Option<String>,
    /// Internal workflow flags.
    pub internal_status: Option<String>,
    /// CRM note template stub.
    pub note_stub: Option<String>,

    /// ISO-8601 timestamp of the last source update.
    pub updated_at: Option<String>,
    /// Archive flag: 0 is active, 1 is archived.
    pub is_archive: Option<i32>,
}
