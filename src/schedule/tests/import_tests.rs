//! End-to-end import tests against the in-memory adapters.

use crate::schedule::adapters::memory::{InMemoryReferenceResolver, InMemoryTaskStore};
use crate::schedule::domain::{ScheduledTask, WritingScheduleRow};
use crate::schedule::ports::TaskStore;
use crate::schedule::services::ScheduleImportService;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

struct Harness {
    resolver: Arc<InMemoryReferenceResolver>,
    store: Arc<InMemoryTaskStore>,
    service: ScheduleImportService<InMemoryReferenceResolver, InMemoryTaskStore, DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let resolver = Arc::new(InMemoryReferenceResolver::new());
    let store = Arc::new(InMemoryTaskStore::new());
    let service = ScheduleImportService::new(
        Arc::clone(&resolver),
        Arc::clone(&store),
        Arc::new(DefaultClock),
    );
    Harness {
        resolver,
        store,
        service,
    }
}

fn row(task_id: &str, task_type: &str, bernie: Option<&str>) -> WritingScheduleRow {
    WritingScheduleRow {
        task_id: task_id.to_owned(),
        funder: Some("Example Foundation".to_owned()),
        bernie_identifier: bernie.map(str::to_owned),
        task_type: Some(task_type.to_owned()),
        status: Some("2. Application Submitted".to_owned()),
        amount: Some("50000".to_owned()),
        deadline: Some("2025-06-30".to_owned()),
        reports_due: Some("2026-01-31".to_owned()),
        owner: Some("Jordan Smith".to_owned()),
        ..WritingScheduleRow::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_persists_resolved_tasks(harness: Harness) {
    let summary = harness
        .service
        .import(vec![
            row("TASK-001", "Proposal", Some("BN0002E1")),
            row("TASK-002", "LOI", Some("BN0002E2")),
        ])
        .await;

    assert_eq!(summary.saved_count, 2);
    assert!(summary.errors.is_empty());
    assert_eq!(summary.new_status_count, 1);
    assert_eq!(summary.new_funder_count, 2);
    assert_eq!(summary.new_owner_count, 1);
    assert_eq!(harness.store.len(), 2);

    let fetched = harness
        .store
        .find_by_task_id("TASK-001")
        .await
        .expect("lookup succeeds")
        .expect("task was persisted");
    assert!(matches!(fetched, ScheduledTask::Proposal(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_records_failures_and_keeps_going(harness: Harness) {
    let mut bad_amount = row("TASK-002", "Proposal", Some("BN0002E2"));
    bad_amount.amount = Some("-1".to_owned());
    let no_id = row("", "Proposal", Some("BN0002E3"));

    let summary = harness
        .service
        .import(vec![
            row("TASK-001", "Proposal", Some("BN0002E1")),
            bad_amount,
            no_id,
            // Missing funder key degrades to the placeholder and fails
            // entity validation downstream.
            row("TASK-004", "Proposal", None),
        ])
        .await;

    assert_eq!(summary.saved_count, 1);
    assert_eq!(summary.errors.len(), 3);
    assert_eq!(summary.errors[0].task_id, "TASK-002");
    assert_eq!(summary.errors[1].task_id, "unknown");
    assert_eq!(summary.errors[2].task_id, "TASK-004");
    assert_eq!(harness.store.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reimport_is_idempotent(harness: Harness) {
    let rows = vec![row("TASK-001", "Proposal", Some("BN0002E1"))];

    let first = harness.service.import(rows.clone()).await;
    let second = harness.service.import(rows).await;

    assert_eq!(first.saved_count, 1);
    assert_eq!(second.saved_count, 1);
    assert_eq!(second.new_status_count, 0);
    assert_eq!(second.new_funder_count, 0);
    assert_eq!(second.new_owner_count, 0);
    assert_eq!(harness.store.len(), 1);
    assert_eq!(harness.resolver.status_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn proposal_and_report_row_persists_under_one_id(harness: Harness) {
    let summary = harness
        .service
        .import(vec![row("TASK-001", "Proposal & Report", Some("BN0002E1"))])
        .await;

    // Both entities resolve, share the row's identifier, and the store's
    // last-write-wins contract keeps the later report.
    assert_eq!(summary.saved_count, 2);
    assert_eq!(harness.store.len(), 1);
    let fetched = harness
        .store
        .find_by_task_id("TASK-001")
        .await
        .expect("lookup succeeds")
        .expect("task was persisted");
    assert!(matches!(fetched, ScheduledTask::Report(_)));
}
