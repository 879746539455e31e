//! Workflow semantics for (status id, task kind) pairs.
//!
//! The database stores opaque status ids; what a status *means* for
//! workflow lives here, in one visible, changeable table. The same id
//! carries different meanings per task kind: id 1 is "invited to submit a
//! full proposal" for an LOI but "grant awarded" for a proposal, so the
//! lookup is keyed on the pair, never the id alone.

use super::{StatusId, TaskKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Business-meaning classification of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Needs work now.
    Actionable,
    /// Waiting for an external response.
    Waiting,
    /// Goal achieved.
    Successful,
    /// Goal not achieved.
    Unsuccessful,
    /// Done, no further action.
    Complete,
    /// Unclear; needs human judgment.
    NeedsReview,
}

impl WorkflowState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Actionable => "actionable",
            Self::Waiting => "waiting",
            Self::Successful => "successful",
            Self::Unsuccessful => "unsuccessful",
            Self::Complete => "complete",
            Self::NeedsReview => "needs_review",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a status means for workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSemantics {
    /// Business-meaning classification.
    pub workflow_state: WorkflowState,
    /// Whether the task can or should be worked on now.
    pub is_actionable: bool,
    /// Whether no more work is needed.
    pub is_terminal: bool,
    /// Whether a follow-up action is required.
    pub needs_follow_up: bool,
    /// Human-readable explanation of the mapping.
    pub description: String,
}

/// Returns the workflow semantics for a (status id, task kind) pair.
///
/// Unmapped pairs, including every reminder, fall back to
/// [`WorkflowState::NeedsReview`] with `needs_follow_up` set and a
/// description naming the unmapped id, so operators can extend the table
/// instead of silently misclassifying.
#[must_use]
pub fn semantics(status_id: StatusId, kind: TaskKind) -> StatusSemantics {
    match kind {
        TaskKind::Loi => loi_semantics(status_id),
        TaskKind::Proposal => proposal_semantics(status_id),
        TaskKind::Report => report_semantics(status_id),
        TaskKind::Reminder => unmapped(status_id, kind),
    }
}

/// Whether the task can or should be worked on now.
#[must_use]
pub fn is_actionable(status_id: StatusId, kind: TaskKind) -> bool {
    semantics(status_id, kind).is_actionable
}

/// Whether the task achieved its goal.
#[must_use]
pub fn was_successful(status_id: StatusId, kind: TaskKind) -> bool {
    semantics(status_id, kind).workflow_state == WorkflowState::Successful
}

/// Whether the task needs a follow-up action.
#[must_use]
pub fn needs_follow_up(status_id: StatusId, kind: TaskKind) -> bool {
    semantics(status_id, kind).needs_follow_up
}

fn entry(
    workflow_state: WorkflowState,
    is_actionable: bool,
    is_terminal: bool,
    needs_follow_up: bool,
    description: &str,
) -> StatusSemantics {
    StatusSemantics {
        workflow_state,
        is_actionable,
        is_terminal,
        needs_follow_up,
        description: description.to_owned(),
    }
}

fn unmapped(status_id: StatusId, kind: TaskKind) -> StatusSemantics {
    StatusSemantics {
        workflow_state: WorkflowState::NeedsReview,
        is_actionable: false,
        is_terminal: false,
        needs_follow_up: true,
        description: format!("status {status_id} has no semantic mapping for {kind} tasks"),
    }
}

fn loi_semantics(status_id: StatusId) -> StatusSemantics {
    match status_id.value() {
        // "Awarded" for an LOI means invited to apply.
        1 => entry(
            WorkflowState::Successful,
            true,
            false,
            true,
            "Invited to submit full proposal",
        ),
        3 => entry(
            WorkflowState::Waiting,
            false,
            false,
            false,
            "Waiting for invitation decision",
        ),
        4 => entry(
            WorkflowState::Actionable,
            true,
            false,
            false,
            "Actively drafting LOI",
        ),
        5 => entry(
            WorkflowState::Actionable,
            true,
            false,
            false,
            "Planned for future submission",
        ),
        6 => entry(
            WorkflowState::Actionable,
            true,
            false,
            false,
            "Researching opportunity",
        ),
        8 => entry(
            WorkflowState::Unsuccessful,
            false,
            true,
            false,
            "Not invited to apply",
        ),
        10 | 11 => entry(
            WorkflowState::Complete,
            false,
            true,
            false,
            "Cannot or will not apply",
        ),
        _ => unmapped(status_id, TaskKind::Loi),
    }
}

fn proposal_semantics(status_id: StatusId) -> StatusSemantics {
    match status_id.value() {
        1 => entry(
            WorkflowState::Successful,
            true,
            false,
            true,
            "Grant awarded - schedule reports",
        ),
        2 => entry(
            WorkflowState::Waiting,
            false,
            false,
            false,
            "Waiting for funding decision",
        ),
        4 => entry(
            WorkflowState::Actionable,
            true,
            false,
            false,
            "Actively drafting proposal",
        ),
        7 => entry(
            WorkflowState::Complete,
            false,
            true,
            false,
            "Grant complete and closed",
        ),
        8 => entry(
            WorkflowState::Unsuccessful,
            true,
            true,
            true,
            "Proposal denied - consider feedback",
        ),
        9 => entry(
            WorkflowState::Waiting,
            false,
            false,
            true,
            "On hold - monitor for updates",
        ),
        _ => unmapped(status_id, TaskKind::Proposal),
    }
}

fn report_semantics(status_id: StatusId) -> StatusSemantics {
    match status_id.value() {
        4 => entry(
            WorkflowState::Actionable,
            true,
            false,
            false,
            "Drafting report",
        ),
        // Planned reports are visible but not due yet.
        5 => entry(
            WorkflowState::Actionable,
            false,
            false,
            false,
            "Report planned for future",
        ),
        7 => entry(
            WorkflowState::Complete,
            false,
            true,
            false,
            "Report submitted - complete",
        ),
        _ => unmapped(status_id, TaskKind::Report),
    }
}
