//! In-memory implementation of the `ReferenceResolver` port.
//!
//! Provides a thread-safe resolver for unit testing without database
//! dependencies. Not suitable for production use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::schedule::domain::{MemberId, RawStatus, StatusId};
use crate::schedule::ports::{
    ReferenceResolver, ReferenceResolverError, ReferenceResolverResult, ResolutionRequest,
    ResolutionResult,
};

#[derive(Debug, Default)]
struct ResolverState {
    /// (status text, source system) -> status record.
    statuses: HashMap<(String, String), RawStatus>,
    next_status_id: i32,
    /// bernie number -> canonical name.
    funders: HashMap<String, String>,
    /// owner full name -> surrogate id.
    owners: HashMap<String, i32>,
    next_owner_id: i32,
}

/// In-memory implementation of [`ReferenceResolver`].
///
/// Thread-safe via internal [`RwLock`]. Surrogate ids are allocated
/// sequentially from 1 in creation order. Suitable for unit tests only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReferenceResolver {
    state: Arc<RwLock<ResolverState>>,
}

impl InMemoryReferenceResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct status rows.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn status_count(&self) -> usize {
        self.state.read().map(|s| s.statuses.len()).unwrap_or(0)
    }

    /// Returns the number of distinct funder rows.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn funder_count(&self) -> usize {
        self.state.read().map(|s| s.funders.len()).unwrap_or(0)
    }

    /// Returns the number of distinct owner rows.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn owner_count(&self) -> usize {
        self.state.read().map(|s| s.owners.len()).unwrap_or(0)
    }

    /// Returns the canonical name stored for a funder, if any.
    #[must_use]
    pub fn funder_name(&self, bernie_number: &str) -> Option<String> {
        self.state
            .read()
            .ok()
            .and_then(|s| s.funders.get(bernie_number).cloned())
    }

    /// Returns the stored status record for a (text, source system) pair.
    #[must_use]
    pub fn status(&self, status_text: &str, source_system: &str) -> Option<RawStatus> {
        self.state.read().ok().and_then(|s| {
            s.statuses
                .get(&(status_text.to_owned(), source_system.to_owned()))
                .cloned()
        })
    }

    fn poisoned(e: impl std::fmt::Display) -> ReferenceResolverError {
        ReferenceResolverError::persistence(std::io::Error::other(format!("lock poisoned: {e}")))
    }
}

#[async_trait]
impl ReferenceResolver for InMemoryReferenceResolver {
    async fn resolve(
        &self,
        request: &ResolutionRequest,
    ) -> ReferenceResolverResult<ResolutionResult> {
        // Single write lock stands in for the transactional upsert batch.
        let mut state = self.state.write().map_err(Self::poisoned)?;

        let status_key = (request.status_text.clone(), request.source_system.clone());
        let status_was_new = !state.statuses.contains_key(&status_key);
        if status_was_new {
            state.next_status_id = state.next_status_id.saturating_add(1);
            let record = RawStatus::new(
                StatusId::new(state.next_status_id),
                request.status_text.clone(),
                request.source_system.clone(),
            );
            state.statuses.insert(status_key.clone(), record);
        }
        let status_id = state
            .statuses
            .get(&status_key)
            .map(RawStatus::id)
            .ok_or_else(|| ReferenceResolverError::MissingStatusRow {
                status_text: request.status_text.clone(),
                source_system: request.source_system.clone(),
            })?;

        let funder_was_new = !state.funders.contains_key(&request.bernie_number);
        state
            .funders
            .insert(request.bernie_number.clone(), request.canonical_name.clone());

        let mut owner_id = None;
        let mut owner_was_new = false;
        if let Some(name) = &request.owner_name {
            owner_was_new = !state.owners.contains_key(name);
            if owner_was_new {
                state.next_owner_id = state.next_owner_id.saturating_add(1);
                let id = state.next_owner_id;
                state.owners.insert(name.clone(), id);
            }
            let id = state
                .owners
                .get(name)
                .copied()
                .ok_or_else(|| ReferenceResolverError::MissingOwnerRow(name.clone()))?;
            owner_id = Some(MemberId::new(id));
        }

        Ok(ResolutionResult {
            status_id,
            funder_id: request.bernie_number.clone(),
            owner_id,
            status_was_new,
            funder_was_new,
            owner_was_new,
        })
    }
}
