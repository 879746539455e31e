//! Row decomposition tests: type dispatch, field mapping, and fallbacks.

use crate::schedule::domain::{
    LoiStatus, ProposalStatus, ReportStatus, ScheduleDomainError, TaskBlueprint, TaskKind,
    WritingScheduleRow,
};
use crate::schedule::services::{DecomposeError, decompose_row};
use crate::schedule::services::decomposer::{
    UNKNOWN_FUNDER_ID, UNKNOWN_FUNDER_NAME, UNKNOWN_STATUS,
};
use chrono::NaiveDate;
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use std::str::FromStr;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn proposal_row() -> WritingScheduleRow {
    WritingScheduleRow {
        task_id: "DOBBFD-GA25E-NSO-PROP-240830".to_owned(),
        funder: Some("Example Foundation".to_owned()),
        bernie_identifier: Some("BN0002E1".to_owned()),
        task_type: Some("Proposal".to_owned()),
        status: Some("2. Application Submitted".to_owned()),
        amount: Some("100000.50".to_owned()),
        award: None,
        deadline: Some("2025-06-30".to_owned()),
        reports_due: Some("2026-01-31".to_owned()),
        owner: Some("Jordan Smith".to_owned()),
        fiscal_year: Some("FY25".to_owned()),
        area: Some("Education".to_owned()),
        ..WritingScheduleRow::default()
    }
}

#[rstest]
fn proposal_row_maps_fields_and_status(clock: DefaultClock) {
    let blueprints = decompose_row(&proposal_row(), &clock).expect("row decomposes");
    let [TaskBlueprint::Proposal(proposal)] = blueprints.as_slice() else {
        panic!("expected exactly one proposal blueprint");
    };

    assert_eq!(proposal.core.bernie_number, "BN0002E1");
    assert_eq!(proposal.core.funder_name, "Example Foundation");
    assert_eq!(proposal.core.status_text, "2. Application Submitted");
    assert_eq!(proposal.core.owner_name.as_deref(), Some("Jordan Smith"));
    assert_eq!(proposal.status, ProposalStatus::Submitted);
    assert_eq!(
        proposal.amount_requested,
        Decimal::from_str("100000.50").expect("valid decimal literal")
    );
    assert!(!proposal.core.deadline_defaulted);
    assert_eq!(
        proposal.core.deadline.date_naive(),
        NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid calendar date")
    );
    // Not tracked in the writing schedule.
    assert_eq!(proposal.submission_date, None);
}

#[rstest]
fn proposal_with_empty_amount_gets_exact_zero(clock: DefaultClock) {
    let mut row = proposal_row();
    row.amount = Some("".to_owned());

    let blueprints = decompose_row(&row, &clock).expect("row decomposes");
    let [TaskBlueprint::Proposal(proposal)] = blueprints.as_slice() else {
        panic!("expected exactly one proposal blueprint");
    };
    assert_eq!(proposal.amount_requested, Decimal::ZERO);
}

#[rstest]
fn proposal_with_negative_amount_fails_decomposition(clock: DefaultClock) {
    let mut row = proposal_row();
    row.amount = Some("-500".to_owned());

    let negative = Decimal::from_str("-500").expect("valid decimal literal");
    assert_eq!(
        decompose_row(&row, &clock),
        Err(DecomposeError::Domain(
            ScheduleDomainError::NegativeProposalAmount(negative)
        ))
    );
}

#[rstest]
fn proposal_and_report_row_fans_out_to_both(clock: DefaultClock) {
    let mut row = proposal_row();
    row.task_type = Some("Proposal & Report".to_owned());

    let blueprints = decompose_row(&row, &clock).expect("row decomposes");
    let [TaskBlueprint::Proposal(proposal), TaskBlueprint::Report(report)] =
        blueprints.as_slice()
    else {
        panic!("expected a proposal followed by a report");
    };

    assert_eq!(proposal.core.task_id, report.core.task_id);
    assert_eq!(proposal.core.bernie_number, report.core.bernie_number);
    assert_eq!(proposal.core.status_text, report.core.status_text);
    assert_eq!(report.report_type, "Report");
    // The report is due on the reporting date, not the proposal deadline.
    assert_eq!(
        report.core.deadline.date_naive(),
        NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid calendar date")
    );
}

#[rstest]
#[case("Report")]
#[case("Final Report")]
#[case("Interim Report")]
fn report_type_tag_is_preserved_verbatim(#[case] tag: &str, clock: DefaultClock) {
    let mut row = proposal_row();
    row.task_type = Some(tag.to_owned());
    row.status = Some("5. Report Submitted".to_owned());

    let blueprints = decompose_row(&row, &clock).expect("row decomposes");
    let [TaskBlueprint::Report(report)] = blueprints.as_slice() else {
        panic!("expected exactly one report blueprint");
    };
    assert_eq!(report.report_type, tag);
    assert_eq!(report.status, ReportStatus::Submitted);
}

#[rstest]
fn loi_row_keeps_optional_amount_absent(clock: DefaultClock) {
    let mut row = proposal_row();
    row.task_type = Some("LOI".to_owned());
    row.status = Some("3. LOI Submitted".to_owned());
    row.amount = None;

    let blueprints = decompose_row(&row, &clock).expect("row decomposes");
    let [TaskBlueprint::Loi(loi)] = blueprints.as_slice() else {
        panic!("expected exactly one LOI blueprint");
    };
    assert_eq!(loi.status, LoiStatus::Submitted);
    assert_eq!(loi.amount_requested, None);
}

#[rstest]
#[case(Some("Reminder"))]
#[case(Some("Prospect Research"))]
#[case(None)]
fn unknown_type_tags_degrade_to_reminder(#[case] tag: Option<&str>, clock: DefaultClock) {
    let mut row = proposal_row();
    row.task_type = tag.map(str::to_owned);
    row.dev_team_notes = Some("Check back next quarter".to_owned());

    let blueprints = decompose_row(&row, &clock).expect("row decomposes");
    assert_eq!(blueprints.len(), 1);
    let TaskBlueprint::Reminder(reminder) = &blueprints[0] else {
        panic!("expected a reminder blueprint");
    };
    assert_eq!(blueprints[0].kind(), TaskKind::Reminder);
    assert_eq!(
        reminder.reminder_note.as_deref(),
        Some("Check back next quarter")
    );
}

#[rstest]
fn missing_natural_keys_get_degenerate_defaults(clock: DefaultClock) {
    let mut row = proposal_row();
    row.bernie_identifier = None;
    row.funder = Some("   ".to_owned());
    row.status = None;
    row.owner = Some("".to_owned());

    let blueprints = decompose_row(&row, &clock).expect("row decomposes");
    let core = blueprints[0].core();

    assert_eq!(core.bernie_number, UNKNOWN_FUNDER_ID);
    assert_eq!(core.funder_name, UNKNOWN_FUNDER_NAME);
    assert_eq!(core.status_text, UNKNOWN_STATUS);
    // Absent owner means no assignment, never a placeholder.
    assert_eq!(core.owner_name, None);
}

#[rstest]
fn unparseable_deadline_defaults_to_now_and_is_flagged(clock: DefaultClock) {
    let mut row = proposal_row();
    row.deadline = Some("sometime in June".to_owned());

    let before = clock.utc();
    let blueprints = decompose_row(&row, &clock).expect("row decomposes");
    let after = clock.utc();
    let core = blueprints[0].core();

    assert!(core.deadline_defaulted);
    assert!(core.deadline >= before && core.deadline <= after);
}

#[rstest]
fn row_without_task_id_is_rejected(clock: DefaultClock) {
    let mut row = proposal_row();
    row.task_id = "  ".to_owned();

    assert_eq!(decompose_row(&row, &clock), Err(DecomposeError::MissingTaskId));
}
