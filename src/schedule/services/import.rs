//! End-to-end import service: raw rows in, persisted tasks out.

use super::{BatchError, BatchOrchestrator, decomposer};
use crate::schedule::domain::{TaskBlueprint, WritingScheduleRow};
use crate::schedule::ports::{ReferenceResolver, TaskStore};
use mockable::Clock;
use std::sync::Arc;

/// Placeholder identifier recorded when a failing row's task identifier
/// cannot be determined.
const UNKNOWN_TASK_ID: &str = "unknown";

/// Accumulated outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// How many tasks were resolved and persisted.
    pub saved_count: usize,
    /// Per-row and per-blueprint failures, in input order.
    pub errors: Vec<BatchError>,
    /// How many status rows the run created.
    pub new_status_count: usize,
    /// How many funder rows the run created.
    pub new_funder_count: usize,
    /// How many owner rows the run created.
    pub new_owner_count: usize,
}

/// Drives the full pipeline: decompose rows, resolve natural keys, and
/// persist the resulting tasks.
#[derive(Clone)]
pub struct ScheduleImportService<R, S, C>
where
    R: ReferenceResolver,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    batch: BatchOrchestrator<R>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> ScheduleImportService<R, S, C>
where
    R: ReferenceResolver,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new import service.
    #[must_use]
    pub const fn new(resolver: Arc<R>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            batch: BatchOrchestrator::new(resolver),
            store,
            clock,
        }
    }

    /// Imports a batch of raw rows.
    ///
    /// Each row is decomposed and resolved independently; failures at any
    /// stage are recorded against the row's task identifier and the run
    /// continues. Tasks that resolve are saved last-write-wins, so
    /// re-importing the same rows is idempotent.
    pub async fn import(
        &self,
        rows: impl IntoIterator<Item = WritingScheduleRow>,
    ) -> ImportSummary {
        let mut summary = ImportSummary::default();

        let mut blueprints: Vec<TaskBlueprint> = Vec::new();
        for row in rows {
            match decomposer::decompose_row(&row, &*self.clock) {
                Ok(decomposed) => blueprints.extend(decomposed),
                Err(err) => {
                    let task_id = if row.task_id.trim().is_empty() {
                        UNKNOWN_TASK_ID.to_owned()
                    } else {
                        row.task_id.trim().to_owned()
                    };
                    summary.errors.push(BatchError {
                        task_id,
                        message: err.to_string(),
                    });
                }
            }
        }

        let outcome = self.batch.process_batch(blueprints).await;
        summary.errors.extend(outcome.errors.clone());
        summary.new_status_count = outcome.new_status_count;
        summary.new_funder_count = outcome.new_funder_count;
        summary.new_owner_count = outcome.new_owner_count;

        for orchestrated in outcome.tasks {
            let task_id = orchestrated.task.task_id().to_owned();
            match self.store.save(&orchestrated.task).await {
                Ok(()) => summary.saved_count = summary.saved_count.saturating_add(1),
                Err(err) => summary.errors.push(BatchError {
                    task_id,
                    message: err.to_string(),
                }),
            }
        }

        summary
    }
}
