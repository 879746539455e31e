//! `PostgreSQL` adapter implementing the resolver and task store ports.

use super::{
    models::{
        FunderRow, LoiRow, NewDevTeamMemberRow, NewRawStatusRow, ProposalRow, ReminderRow,
        ReportRow, ScheduledTaskRow,
    },
    schema::{dev_team_members, funders, lois, proposals, raw_statuses, reminders, reports,
        scheduled_tasks},
};
use crate::schedule::{
    domain::{
        BernieNumber, Loi, LoiStatus, MemberId, Proposal, ProposalStatus, Reminder, Report,
        ReportStatus, ScheduledTask, StatusId, TaskCore, TaskKind,
    },
    ports::{
        ReferenceResolver, ReferenceResolverError, ReferenceResolverResult, ResolutionRequest,
        ResolutionResult, TaskStore, TaskStoreError, TaskStoreResult,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

/// `PostgreSQL` connection pool type used by schedule adapters.
pub type SchedulePgPool = Pool<ConnectionManager<PgConnection>>;

/// Adapter-internal constructor for wrapping infrastructure failures,
/// letting one blocking helper serve both port error types.
trait FromPersistence {
    /// Wraps a persistence error into the port error type.
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl FromPersistence for ReferenceResolverError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl FromPersistence for TaskStoreError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed schedule repository serving both ports.
#[derive(Debug, Clone)]
pub struct PostgresScheduleRepository {
    pool: SchedulePgPool,
}

impl PostgresScheduleRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SchedulePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: FromPersistence + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_persistence)?
    }
}

#[async_trait]
impl ReferenceResolver for PostgresScheduleRepository {
    async fn resolve(
        &self,
        request: &ResolutionRequest,
    ) -> ReferenceResolverResult<ResolutionResult> {
        let request = request.clone();
        self.run_blocking(move |connection| {
            connection.transaction(|connection| resolve_in_transaction(connection, &request))
        })
        .await
    }
}

#[async_trait]
impl TaskStore for PostgresScheduleRepository {
    async fn save(&self, task: &ScheduledTask) -> TaskStoreResult<()> {
        let task = task.clone();
        self.run_blocking(move |connection| {
            connection.transaction(|connection| save_in_transaction(connection, &task))
        })
        .await
    }

    async fn find_by_task_id(&self, task_id: &str) -> TaskStoreResult<Option<ScheduledTask>> {
        let task_id = task_id.to_owned();
        self.run_blocking(move |connection| {
            let core = scheduled_tasks::table
                .filter(scheduled_tasks::task_id.eq(&task_id))
                .select(ScheduledTaskRow::as_select())
                .first::<ScheduledTaskRow>(connection)
                .optional()?;
            core.map(|row| load_task(connection, row)).transpose()
        })
        .await
    }
}

fn resolve_in_transaction(
    connection: &mut PgConnection,
    request: &ResolutionRequest,
) -> ReferenceResolverResult<ResolutionResult> {
    // Insert-or-ignore, then read back: the affected-row count tells us
    // whether this call created the row.
    let inserted = diesel::insert_into(raw_statuses::table)
        .values(NewRawStatusRow {
            status_text: request.status_text.clone(),
            source_system: request.source_system.clone(),
        })
        .on_conflict((raw_statuses::status_text, raw_statuses::source_system))
        .do_nothing()
        .execute(connection)?;
    let status_was_new = inserted > 0;
    let status_id = raw_statuses::table
        .filter(raw_statuses::status_text.eq(&request.status_text))
        .filter(raw_statuses::source_system.eq(&request.source_system))
        .select(raw_statuses::id)
        .first::<i32>(connection)
        .optional()?
        .ok_or_else(|| ReferenceResolverError::MissingStatusRow {
            status_text: request.status_text.clone(),
            source_system: request.source_system.clone(),
        })?;

    // Existence is checked before the upsert so the was-new flag stays
    // accurate even when the update path fires.
    let funder_was_new = funders::table
        .filter(funders::bernie_number.eq(&request.bernie_number))
        .select(funders::bernie_number)
        .first::<String>(connection)
        .optional()?
        .is_none();
    let now = Utc::now();
    diesel::insert_into(funders::table)
        .values(FunderRow {
            bernie_number: request.bernie_number.clone(),
            canonical_name: request.canonical_name.clone(),
            aliases: json!([request.canonical_name]),
            ein: None,
            updated_at: now,
        })
        .on_conflict(funders::bernie_number)
        .do_update()
        .set((
            funders::canonical_name.eq(&request.canonical_name),
            funders::updated_at.eq(now),
        ))
        .execute(connection)?;

    let mut owner_id = None;
    let mut owner_was_new = false;
    if let Some(name) = &request.owner_name {
        let inserted = diesel::insert_into(dev_team_members::table)
            .values(NewDevTeamMemberRow {
                full_name: name.clone(),
                email: None,
                role: None,
            })
            .on_conflict(dev_team_members::full_name)
            .do_nothing()
            .execute(connection)?;
        owner_was_new = inserted > 0;
        let id = dev_team_members::table
            .filter(dev_team_members::full_name.eq(name))
            .select(dev_team_members::id)
            .first::<i32>(connection)
            .optional()?
            .ok_or_else(|| ReferenceResolverError::MissingOwnerRow(name.clone()))?;
        owner_id = Some(MemberId::new(id));
    }

    Ok(ResolutionResult {
        status_id: StatusId::new(status_id),
        funder_id: request.bernie_number.clone(),
        owner_id,
        status_was_new,
        funder_was_new,
        owner_was_new,
    })
}

fn save_in_transaction(
    connection: &mut PgConnection,
    task: &ScheduledTask,
) -> TaskStoreResult<()> {
    let core_row = to_core_row(task);
    diesel::insert_into(scheduled_tasks::table)
        .values(&core_row)
        .on_conflict(scheduled_tasks::task_id)
        .do_update()
        .set(&core_row)
        .execute(connection)?;

    // Last-write-wins across kinds: only the satellite matching the new
    // variant survives.
    let task_id = task.task_id();
    if task.kind() != TaskKind::Loi {
        diesel::delete(lois::table.filter(lois::task_id.eq(task_id))).execute(connection)?;
    }
    if task.kind() != TaskKind::Proposal {
        diesel::delete(proposals::table.filter(proposals::task_id.eq(task_id)))
            .execute(connection)?;
    }
    if task.kind() != TaskKind::Report {
        diesel::delete(reports::table.filter(reports::task_id.eq(task_id))).execute(connection)?;
    }
    if task.kind() != TaskKind::Reminder {
        diesel::delete(reminders::table.filter(reminders::task_id.eq(task_id)))
            .execute(connection)?;
    }

    match task {
        ScheduledTask::Loi(loi) => {
            let row = LoiRow {
                task_id: loi.core.task_id.clone(),
                status: loi.status.as_str().to_owned(),
                notification_date: loi.notification_date,
                amount_requested: loi.amount_requested.as_ref().map(Decimal::to_string),
                related_proposal_id: loi.related_proposal_id.clone(),
                dev_team_notes: loi.dev_team_notes.clone(),
            };
            diesel::insert_into(lois::table)
                .values(&row)
                .on_conflict(lois::task_id)
                .do_update()
                .set(&row)
                .execute(connection)?;
        }
        ScheduledTask::Proposal(proposal) => {
            let row = ProposalRow {
                task_id: proposal.core.task_id.clone(),
                status: proposal.status.as_str().to_owned(),
                amount_requested: proposal.amount_requested.to_string(),
                award_amount: proposal.award_amount.as_ref().map(Decimal::to_string),
                submission_date: proposal.submission_date,
                notification_date: proposal.notification_date,
                grant_start_date: proposal.grant_start_date,
                grant_end_date: proposal.grant_end_date,
                communities: proposal.communities.clone(),
                members_funded: proposal.members_funded.clone(),
                model_funded: proposal.model_funded.clone(),
                dev_team_notes: proposal.dev_team_notes.clone(),
                grant_goals: proposal.grant_goals.clone(),
            };
            diesel::insert_into(proposals::table)
                .values(&row)
                .on_conflict(proposals::task_id)
                .do_update()
                .set(&row)
                .execute(connection)?;
        }
        ScheduledTask::Report(report) => {
            let row = ReportRow {
                task_id: report.core.task_id.clone(),
                status: report.status.as_str().to_owned(),
                report_type: report.report_type.clone(),
                related_proposal_id: report.related_proposal_id.clone(),
                submission_date: report.submission_date,
                reporting_period_start: report.reporting_period_start,
                reporting_period_end: report.reporting_period_end,
                acknowledgment_needs: report.acknowledgment_needs.clone(),
                dev_team_notes: report.dev_team_notes.clone(),
            };
            diesel::insert_into(reports::table)
                .values(&row)
                .on_conflict(reports::task_id)
                .do_update()
                .set(&row)
                .execute(connection)?;
        }
        ScheduledTask::Reminder(reminder) => {
            let row = ReminderRow {
                task_id: reminder.core.task_id.clone(),
                reminder_note: reminder.reminder_note.clone(),
            };
            diesel::insert_into(reminders::table)
                .values(&row)
                .on_conflict(reminders::task_id)
                .do_update()
                .set(&row)
                .execute(connection)?;
        }
    }
    Ok(())
}

fn to_core_row(task: &ScheduledTask) -> ScheduledTaskRow {
    let core = task.core();
    ScheduledTaskRow {
        task_id: core.task_id.clone(),
        kind: task.kind().as_str().to_owned(),
        task_type: core.task_type.clone(),
        bernie_number: core.bernie_number.as_str().to_owned(),
        status_id: core.status_id.value(),
        owner_id: core.owner_id.map(MemberId::value),
        deadline: core.deadline,
        deadline_defaulted: core.deadline_defaulted,
        last_modified_in_source: core.last_modified,
        fiscal_year: core.fiscal_year.clone(),
        program_area: core.program_area.clone(),
        initiative: core.initiative.clone(),
        opportunity_id: core.opportunity_id.clone(),
    }
}

fn conversion(task_id: &str, reason: impl Into<String>) -> TaskStoreError {
    TaskStoreError::Conversion {
        task_id: task_id.to_owned(),
        reason: reason.into(),
    }
}

fn to_core(row: &ScheduledTaskRow) -> TaskStoreResult<TaskCore> {
    let bernie_number = BernieNumber::new(row.bernie_number.clone())
        .map_err(|err| conversion(&row.task_id, err.to_string()))?;
    Ok(TaskCore {
        task_id: row.task_id.clone(),
        task_type: row.task_type.clone(),
        bernie_number,
        status_id: StatusId::new(row.status_id),
        owner_id: row.owner_id.map(MemberId::new),
        deadline: row.deadline,
        deadline_defaulted: row.deadline_defaulted,
        last_modified: row.last_modified_in_source,
        fiscal_year: row.fiscal_year.clone(),
        program_area: row.program_area.clone(),
        initiative: row.initiative.clone(),
        opportunity_id: row.opportunity_id.clone(),
    })
}

fn parse_stored_decimal(task_id: &str, value: &str) -> TaskStoreResult<Decimal> {
    Decimal::from_str(value)
        .map_err(|err| conversion(task_id, format!("bad decimal '{value}': {err}")))
}

fn load_task(
    connection: &mut PgConnection,
    core_row: ScheduledTaskRow,
) -> TaskStoreResult<ScheduledTask> {
    let core = to_core(&core_row)?;
    let task_id = core_row.task_id.clone();
    match core_row.kind.as_str() {
        "LOI" => {
            let row = lois::table
                .filter(lois::task_id.eq(&task_id))
                .select(LoiRow::as_select())
                .first::<LoiRow>(connection)
                .optional()?
                .ok_or_else(|| conversion(&task_id, "LOI satellite row missing"))?;
            let status = LoiStatus::try_from(row.status.as_str())
                .map_err(|err| conversion(&task_id, err.to_string()))?;
            let amount_requested = row
                .amount_requested
                .map(|value| parse_stored_decimal(&task_id, &value))
                .transpose()?;
            Ok(ScheduledTask::Loi(Loi {
                core,
                status,
                notification_date: row.notification_date,
                amount_requested,
                related_proposal_id: row.related_proposal_id,
                dev_team_notes: row.dev_team_notes,
            }))
        }
        "Proposal" => {
            let row = proposals::table
                .filter(proposals::task_id.eq(&task_id))
                .select(ProposalRow::as_select())
                .first::<ProposalRow>(connection)
                .optional()?
                .ok_or_else(|| conversion(&task_id, "proposal satellite row missing"))?;
            let status = ProposalStatus::try_from(row.status.as_str())
                .map_err(|err| conversion(&task_id, err.to_string()))?;
            let amount_requested = parse_stored_decimal(&task_id, &row.amount_requested)?;
            let award_amount = row
                .award_amount
                .map(|value| parse_stored_decimal(&task_id, &value))
                .transpose()?;
            Ok(ScheduledTask::Proposal(Proposal {
                core,
                status,
                amount_requested,
                award_amount,
                submission_date: row.submission_date,
                notification_date: row.notification_date,
                grant_start_date: row.grant_start_date,
                grant_end_date: row.grant_end_date,
                communities: row.communities,
                members_funded: row.members_funded,
                model_funded: row.model_funded,
                dev_team_notes: row.dev_team_notes,
                grant_goals: row.grant_goals,
            }))
        }
        "Report" => {
            let row = reports::table
                .filter(reports::task_id.eq(&task_id))
                .select(ReportRow::as_select())
                .first::<ReportRow>(connection)
                .optional()?
                .ok_or_else(|| conversion(&task_id, "report satellite row missing"))?;
            let status = ReportStatus::try_from(row.status.as_str())
                .map_err(|err| conversion(&task_id, err.to_string()))?;
            Ok(ScheduledTask::Report(Report {
                core,
                status,
                report_type: row.report_type,
                related_proposal_id: row.related_proposal_id,
                submission_date: row.submission_date,
                reporting_period_start: row.reporting_period_start,
                reporting_period_end: row.reporting_period_end,
                acknowledgment_needs: row.acknowledgment_needs,
                dev_team_notes: row.dev_team_notes,
            }))
        }
        "Reminder" => {
            let row = reminders::table
                .filter(reminders::task_id.eq(&task_id))
                .select(ReminderRow::as_select())
                .first::<ReminderRow>(connection)
                .optional()?
                .ok_or_else(|| conversion(&task_id, "reminder satellite row missing"))?;
            Ok(ScheduledTask::Reminder(Reminder {
                core,
                reminder_note: row.reminder_note,
            }))
        }
        other => Err(conversion(&task_id, format!("unknown task kind '{other}'"))),
    }
}
