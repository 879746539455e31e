//! In-memory implementation of the `TaskStore` port.
//!
//! Thread-safe store for unit testing without database dependencies.
//! Not suitable for production use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::schedule::domain::ScheduledTask;
use crate::schedule::ports::{TaskStore, TaskStoreError, TaskStoreResult};

/// In-memory implementation of [`TaskStore`].
///
/// Saving under an existing task id replaces the stored task wholesale,
/// mirroring the last-write-wins contract of the port.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<String, ScheduledTask>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no tasks are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned(e: impl std::fmt::Display) -> TaskStoreError {
        TaskStoreError::persistence(std::io::Error::other(format!("lock poisoned: {e}")))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn save(&self, task: &ScheduledTask) -> TaskStoreResult<()> {
        let mut guard = self.tasks.write().map_err(Self::poisoned)?;
        guard.insert(task.task_id().to_owned(), task.clone());
        Ok(())
    }

    async fn find_by_task_id(&self, task_id: &str) -> TaskStoreResult<Option<ScheduledTask>> {
        let guard = self.tasks.read().map_err(Self::poisoned)?;
        Ok(guard.get(task_id).cloned())
    }
}
