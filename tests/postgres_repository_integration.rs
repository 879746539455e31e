//! Integration tests for [`PostgresScheduleRepository`] using embedded `PostgreSQL`.
//!
//! These tests exercise the `PostgreSQL` adapter against a real database
//! instance, verifying atomic reference resolution, satellite-table
//! round-trips for every task variant, and last-write-wins resaves.
//!
//! Uses `pg-embed-setup-unpriv` for embedded `PostgreSQL` lifecycle management.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::print_stderr,
    reason = "Test cleanup warnings are informational"
)]

use chrono::{NaiveDate, TimeZone, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use granary::schedule::{
    adapters::postgres::PostgresScheduleRepository,
    domain::{
        BernieNumber, Loi, LoiStatus, Proposal, ProposalStatus, Reminder, Report, ReportStatus,
        ScheduledTask, TaskCore,
    },
    ports::{ReferenceResolver, ResolutionRequest, ResolutionResult, TaskStore},
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use rust_decimal::Decimal;
use std::str::FromStr;
use tokio::runtime::Runtime;

/// SQL to create the schedule schema for tests.
const CREATE_SCHEMA_SQL: &str =
    include_str!("../migrations/2025-08-30-000000_create_schedule_tables/up.sql");

/// Template database name for pre-migrated schema.
const TEMPLATE_DB: &str = "granary_test_template";

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
fn ensure_template(cluster: &TestCluster) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            // Execute statement-by-statement since diesel::sql_query cannot
            // execute multiple statements in a single call
            execute_sql_statements(&mut conn, CREATE_SCHEMA_SQL)?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    Ok(())
}

/// Executes multiple SQL statements from a single string.
///
/// Splits on semicolons and executes each non-empty statement individually.
/// Comments (lines starting with --) are preserved within statements.
fn execute_sql_statements(conn: &mut PgConnection, sql: &str) -> eyre::Result<()> {
    for statement in sql.split(';') {
        let trimmed = statement.trim();
        // Skip empty statements and comment-only lines
        if trimmed.is_empty() || trimmed.lines().all(|line| line.trim().starts_with("--")) {
            continue;
        }
        diesel::sql_query(trimmed)
            .execute(conn)
            .map_err(|e| eyre::eyre!("SQL error: {e}\nStatement: {trimmed}"))?;
    }
    Ok(())
}

/// Creates a test database from template and returns a repository.
fn setup_repository(
    cluster: &TestCluster,
    db_name: &str,
) -> Result<PostgresScheduleRepository, Box<dyn std::error::Error + Send + Sync>> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let url = cluster.connection().database_url(db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    // Use pool size of 1 for test isolation and deterministic behaviour
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    Ok(PostgresScheduleRepository::new(pool))
}

/// Cleans up a test database.
fn cleanup_database(cluster: &TestCluster, db_name: &str) {
    if let Err(e) = cluster.drop_database(db_name) {
        eprintln!("Warning: failed to drop test database {db_name}: {e}");
    }
}

/// Guard that ensures test database cleanup runs even if the test panics.
struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        cleanup_database(self.cluster, &self.db_name);
    }
}

/// Builds a resolution request for one writing-schedule row.
fn request(owner: Option<&str>, status: &str) -> ResolutionRequest {
    ResolutionRequest::writing_schedule(
        "BN0002E1",
        "Dobb Foundation",
        owner.map(str::to_owned),
        status,
    )
}

/// Builds a task core from a completed resolution.
fn task_core(task_id: &str, task_type: &str, resolution: &ResolutionResult) -> TaskCore {
    let moment = Utc
        .with_ymd_and_hms(2025, 6, 30, 0, 0, 0)
        .single()
        .expect("unambiguous timestamp");
    TaskCore {
        task_id: task_id.to_owned(),
        task_type: task_type.to_owned(),
        bernie_number: BernieNumber::new(resolution.funder_id.clone())
            .expect("resolved funder key is valid"),
        status_id: resolution.status_id,
        owner_id: resolution.owner_id,
        deadline: moment,
        deadline_defaulted: false,
        last_modified: moment,
        fiscal_year: Some("FY25".to_owned()),
        program_area: None,
        initiative: None,
        opportunity_id: None,
    }
}

fn proposal_task(task_id: &str, resolution: &ResolutionResult) -> ScheduledTask {
    ScheduledTask::Proposal(Proposal {
        core: task_core(task_id, "Proposal", resolution),
        status: ProposalStatus::Submitted,
        amount_requested: Decimal::from_str("100000.50").expect("valid decimal literal"),
        award_amount: Some(Decimal::from_str("95000").expect("valid decimal literal")),
        submission_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        notification_date: None,
        grant_start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        grant_end_date: NaiveDate::from_ymd_opt(2026, 12, 31),
        communities: Some("Rural northwest".to_owned()),
        members_funded: None,
        model_funded: None,
        dev_team_notes: Some("Board review pending".to_owned()),
        grant_goals: None,
    })
}

fn report_task(task_id: &str, resolution: &ResolutionResult) -> ScheduledTask {
    ScheduledTask::Report(Report {
        core: task_core(task_id, "Final Report", resolution),
        status: ReportStatus::Active,
        report_type: "Final Report".to_owned(),
        related_proposal_id: None,
        submission_date: None,
        reporting_period_start: NaiveDate::from_ymd_opt(2025, 1, 1),
        reporting_period_end: NaiveDate::from_ymd_opt(2025, 12, 31),
        acknowledgment_needs: None,
        dev_team_notes: None,
    })
}

fn loi_task(task_id: &str, resolution: &ResolutionResult) -> ScheduledTask {
    ScheduledTask::Loi(Loi {
        core: task_core(task_id, "LOI", resolution),
        status: LoiStatus::Submitted,
        notification_date: NaiveDate::from_ymd_opt(2025, 9, 15),
        amount_requested: Some(Decimal::from_str("25000.25").expect("valid decimal literal")),
        related_proposal_id: None,
        dev_team_notes: None,
    })
}

fn reminder_task(task_id: &str, resolution: &ResolutionResult) -> ScheduledTask {
    ScheduledTask::Reminder(Reminder {
        core: task_core(task_id, "Reminder", resolution),
        reminder_note: Some("Check back next quarter".to_owned()),
    })
}

// ============================================================================
// Reference Resolution
// ============================================================================

#[rstest]
fn resolve_is_idempotent_for_repeated_natural_keys(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_resolve_idem_{}", uuid::Uuid::new_v4().simple());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");

    let rt = test_runtime();

    let first = rt
        .block_on(repo.resolve(&request(Some("Jordan Smith"), "1. Awarded")))
        .expect("first resolution");
    assert!(first.status_was_new);
    assert!(first.funder_was_new);
    assert!(first.owner_was_new);
    assert_eq!(first.funder_id, "BN0002E1");

    let second = rt
        .block_on(repo.resolve(&request(Some("Jordan Smith"), "1. Awarded")))
        .expect("second resolution");
    assert!(!second.status_was_new);
    assert!(!second.funder_was_new);
    assert!(!second.owner_was_new);
    assert_eq!(second.status_id, first.status_id);
    assert_eq!(second.owner_id, first.owner_id);
}

#[rstest]
fn resolve_allocates_distinct_ids_per_status_text(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_resolve_ids_{}", uuid::Uuid::new_v4().simple());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");

    let rt = test_runtime();

    let awarded = rt
        .block_on(repo.resolve(&request(None, "1. Awarded")))
        .expect("first resolution");
    let denied = rt
        .block_on(repo.resolve(&request(None, "8. Denied")))
        .expect("second resolution");

    assert!(denied.status_was_new);
    assert!(!denied.funder_was_new);
    assert_ne!(awarded.status_id, denied.status_id);
    // No owner name means no owner row and no assignment.
    assert_eq!(denied.owner_id, None);
    assert!(!denied.owner_was_new);
}

// ============================================================================
// Task Storage Round-Trips
// ============================================================================

#[rstest]
fn save_then_find_round_trips_every_variant(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_round_trip_{}", uuid::Uuid::new_v4().simple());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");

    let rt = test_runtime();
    let resolution = rt
        .block_on(repo.resolve(&request(Some("Jordan Smith"), "2. Application Submitted")))
        .expect("resolution");

    let tasks = vec![
        loi_task("TASK-LOI", &resolution),
        proposal_task("TASK-PROP", &resolution),
        report_task("TASK-RPT", &resolution),
        reminder_task("TASK-REM", &resolution),
    ];
    for task in &tasks {
        rt.block_on(repo.save(task)).expect("save succeeds");
    }

    // Exact decimal text, variant dates, and status vocabulary all
    // survive the round-trip.
    for task in tasks {
        let fetched = rt
            .block_on(repo.find_by_task_id(task.task_id()))
            .expect("lookup succeeds")
            .expect("task was persisted");
        assert_eq!(fetched, task);
    }
}

#[rstest]
fn find_by_task_id_returns_none_for_missing(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_find_none_{}", uuid::Uuid::new_v4().simple());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");

    let rt = test_runtime();
    let fetched = rt
        .block_on(repo.find_by_task_id("NO-SUCH-TASK"))
        .expect("lookup succeeds");
    assert_eq!(fetched, None);
}

#[rstest]
fn resave_updates_satellite_fields_in_place(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_resave_{}", uuid::Uuid::new_v4().simple());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");

    let rt = test_runtime();
    let resolution = rt
        .block_on(repo.resolve(&request(None, "2. Application Submitted")))
        .expect("resolution");

    rt.block_on(repo.save(&proposal_task("TASK-001", &resolution)))
        .expect("first save");

    let mut edited = proposal_task("TASK-001", &resolution);
    if let ScheduledTask::Proposal(proposal) = &mut edited {
        proposal.award_amount = Some(Decimal::from_str("90000").expect("valid decimal literal"));
        // A field cleared in the source clears the stored column.
        proposal.dev_team_notes = None;
    }
    rt.block_on(repo.save(&edited)).expect("second save");

    let fetched = rt
        .block_on(repo.find_by_task_id("TASK-001"))
        .expect("lookup succeeds")
        .expect("task was persisted");
    assert_eq!(fetched, edited);
}

#[rstest]
fn kind_change_resave_replaces_the_satellite_row(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_kind_change_{}", uuid::Uuid::new_v4().simple());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");

    let rt = test_runtime();
    let resolution = rt
        .block_on(repo.resolve(&request(None, "2. Application Submitted")))
        .expect("resolution");

    rt.block_on(repo.save(&proposal_task("TASK-001", &resolution)))
        .expect("save as proposal");
    let replacement = report_task("TASK-001", &resolution);
    rt.block_on(repo.save(&replacement))
        .expect("resave as report");

    // The later save wins wholesale: the proposal satellite is gone and
    // the load follows the new kind discriminator.
    let fetched = rt
        .block_on(repo.find_by_task_id("TASK-001"))
        .expect("lookup succeeds")
        .expect("task was persisted");
    assert_eq!(fetched, replacement);
}
