//! In-memory adapter tests: resolver idempotence and last-write-wins
//! task storage.

use crate::schedule::adapters::memory::{InMemoryReferenceResolver, InMemoryTaskStore};
use crate::schedule::domain::{
    BernieNumber, Reminder, Report, ReportStatus, ScheduledTask, StatusId, TaskCore,
};
use crate::schedule::ports::{ReferenceResolver, ResolutionRequest, TaskStore};
use chrono::{TimeZone, Utc};
use rstest::rstest;

fn core(task_id: &str, task_type: &str) -> TaskCore {
    let moment = Utc
        .with_ymd_and_hms(2025, 3, 1, 0, 0, 0)
        .single()
        .expect("unambiguous timestamp");
    TaskCore {
        task_id: task_id.to_owned(),
        task_type: task_type.to_owned(),
        bernie_number: BernieNumber::new("BN0002E1").expect("valid bernie number"),
        status_id: StatusId::new(1),
        owner_id: None,
        deadline: moment,
        deadline_defaulted: false,
        last_modified: moment,
        fiscal_year: None,
        program_area: None,
        initiative: None,
        opportunity_id: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolver_allocates_sequential_ids_per_natural_key() {
    let resolver = InMemoryReferenceResolver::new();

    let first = resolver
        .resolve(&ResolutionRequest::writing_schedule(
            "BN0002E1",
            "Example Foundation",
            None,
            "1. Awarded",
        ))
        .await
        .expect("resolution succeeds");
    let second = resolver
        .resolve(&ResolutionRequest::writing_schedule(
            "BN0002E1",
            "Example Foundation",
            None,
            "8. Denied",
        ))
        .await
        .expect("resolution succeeds");

    assert_eq!(first.status_id, StatusId::new(1));
    assert_eq!(second.status_id, StatusId::new(2));
    assert!(!second.funder_was_new);

    let record = resolver
        .status("1. Awarded", "writing_schedule")
        .expect("status record stored");
    assert_eq!(record.id(), StatusId::new(1));
    assert_eq!(record.status_text(), "1. Awarded");
    assert_eq!(record.source_system(), "writing_schedule");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolver_updates_canonical_name_last_write_wins() {
    let resolver = InMemoryReferenceResolver::new();

    for name in ["Example Foundation", "Example Foundation (renamed)"] {
        resolver
            .resolve(&ResolutionRequest::writing_schedule(
                "BN0002E1",
                name,
                None,
                "Unknown",
            ))
            .await
            .expect("resolution succeeds");
    }

    assert_eq!(
        resolver.funder_name("BN0002E1").as_deref(),
        Some("Example Foundation (renamed)")
    );
    assert_eq!(resolver.funder_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_replaces_task_wholesale_on_resave() {
    let store = InMemoryTaskStore::new();
    let first = ScheduledTask::Reminder(Reminder {
        core: core("TASK-001", "Reminder"),
        reminder_note: Some("first".to_owned()),
    });
    let second = ScheduledTask::Report(Report {
        core: core("TASK-001", "Final Report"),
        status: ReportStatus::Submitted,
        report_type: "Final Report".to_owned(),
        related_proposal_id: None,
        submission_date: None,
        reporting_period_start: None,
        reporting_period_end: None,
        acknowledgment_needs: None,
        dev_team_notes: None,
    });

    store.save(&first).await.expect("first save succeeds");
    store.save(&second).await.expect("second save succeeds");

    assert_eq!(store.len(), 1);
    let fetched = store
        .find_by_task_id("TASK-001")
        .await
        .expect("lookup succeeds");
    // The later save wins, including the change of kind.
    assert_eq!(fetched, Some(second));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_returns_none_for_unknown_task_id() {
    let store = InMemoryTaskStore::new();
    let fetched = store
        .find_by_task_id("NO-SUCH-TASK")
        .await
        .expect("lookup succeeds");
    assert_eq!(fetched, None);
}
