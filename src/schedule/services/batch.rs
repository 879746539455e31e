//! Batch orchestrator: processes blueprints independently so one bad row
//! never aborts an import.

use super::{OrchestratedTask, TaskOrchestrator};
use crate::schedule::domain::TaskBlueprint;
use crate::schedule::ports::ReferenceResolver;
use std::sync::Arc;

/// One recorded per-blueprint failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchError {
    /// Task identifier of the failing blueprint.
    pub task_id: String,
    /// Human-readable cause.
    pub message: String,
}

/// Accumulated outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Successfully resolved tasks, in input order.
    pub tasks: Vec<OrchestratedTask>,
    /// Per-blueprint failures, in input order.
    pub errors: Vec<BatchError>,
    /// How many status rows the batch created.
    pub new_status_count: usize,
    /// How many funder rows the batch created.
    pub new_funder_count: usize,
    /// How many owner rows the batch created.
    pub new_owner_count: usize,
}

impl BatchOutcome {
    /// Number of blueprints that resolved successfully.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.tasks.len()
    }

    fn record(&mut self, task: OrchestratedTask) {
        if task.resolution.status_was_new {
            self.new_status_count = self.new_status_count.saturating_add(1);
        }
        if task.resolution.funder_was_new {
            self.new_funder_count = self.new_funder_count.saturating_add(1);
        }
        if task.resolution.owner_was_new {
            self.new_owner_count = self.new_owner_count.saturating_add(1);
        }
        self.tasks.push(task);
    }
}

/// Runs blueprints through a [`TaskOrchestrator`], recording failures
/// instead of propagating them.
#[derive(Clone)]
pub struct BatchOrchestrator<R>
where
    R: ReferenceResolver,
{
    orchestrator: TaskOrchestrator<R>,
}

impl<R> BatchOrchestrator<R>
where
    R: ReferenceResolver,
{
    /// Creates a new batch orchestrator.
    #[must_use]
    pub const fn new(resolver: Arc<R>) -> Self {
        Self {
            orchestrator: TaskOrchestrator::new(resolver),
        }
    }

    /// Processes each blueprint independently and tallies the outcome.
    ///
    /// A failing blueprint is recorded under its task identifier and the
    /// batch moves on; the new-row counters only count successful rows.
    pub async fn process_batch(
        &self,
        blueprints: impl IntoIterator<Item = TaskBlueprint>,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for blueprint in blueprints {
            let task_id = blueprint.task_id().to_owned();
            match self.orchestrator.orchestrate(blueprint).await {
                Ok(task) => outcome.record(task),
                Err(err) => outcome.errors.push(BatchError {
                    task_id,
                    message: err.to_string(),
                }),
            }
        }
        outcome
    }
}
