//! Port contract for persisting scheduled tasks.

use crate::schedule::domain::ScheduledTask;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Storage contract for scheduled tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Saves a task, replacing any existing task with the same id.
    ///
    /// The core row and its kind-specific satellite row are written in a
    /// single transaction; re-saving under the same id is last-write-wins,
    /// including a change of kind.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the store rejects the write.
    async fn save(&self, task: &ScheduledTask) -> TaskStoreResult<()>;

    /// Looks up a task by its source identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the store cannot be read or a
    /// stored row cannot be converted back into a domain task.
    async fn find_by_task_id(&self, task_id: &str) -> TaskStoreResult<Option<ScheduledTask>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A stored row could not be converted back into a domain task.
    #[error("stored task {task_id} is not convertible: {reason}")]
    Conversion {
        /// Identifier of the unconvertible task.
        task_id: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for TaskStoreError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
