//! Port contract for natural-key resolution against the reference store.

use crate::schedule::domain::{MemberId, StatusId, WRITING_SCHEDULE_SOURCE};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reference resolution operations.
pub type ReferenceResolverResult<T> = Result<T, ReferenceResolverError>;

/// Natural keys for one row, as extracted by the decomposer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Funder natural key, possibly the degenerate literal `UNKNOWN`.
    pub bernie_number: String,
    /// Funder canonical name for the upsert.
    pub canonical_name: String,
    /// Owner name; absent means no assignment and no owner row.
    pub owner_name: Option<String>,
    /// Raw status text.
    pub status_text: String,
    /// Source-system tag; part of the status uniqueness key.
    pub source_system: String,
}

impl ResolutionRequest {
    /// Creates a request tagged with the writing-schedule source system.
    #[must_use]
    pub fn writing_schedule(
        bernie_number: impl Into<String>,
        canonical_name: impl Into<String>,
        owner_name: Option<String>,
        status_text: impl Into<String>,
    ) -> Self {
        Self {
            bernie_number: bernie_number.into(),
            canonical_name: canonical_name.into(),
            owner_name,
            status_text: status_text.into(),
            source_system: WRITING_SCHEDULE_SOURCE.to_owned(),
        }
    }
}

/// Outcome of resolving one row's natural keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Surrogate id of the status row.
    pub status_id: StatusId,
    /// The funder's natural key, reused directly as its foreign key.
    pub funder_id: String,
    /// Surrogate id of the owner row, when an owner name was present.
    pub owner_id: Option<MemberId>,
    /// Whether this call created the status row.
    pub status_was_new: bool,
    /// Whether this call created the funder row.
    pub funder_was_new: bool,
    /// Whether this call created the owner row.
    pub owner_was_new: bool,
}

/// Reference-store contract for resolving natural keys to surrogate ids.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    /// Resolves one row's natural keys atomically.
    ///
    /// The implementation must upsert within a single transaction: status
    /// insert-or-ignore keyed on (text, source system), funder existence
    /// check followed by insert-or-update, owner insert-if-absent by exact
    /// name. Resolution is idempotent: resolving the same natural key
    /// twice yields the same surrogate id and creates no duplicate row.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceResolverError`] when the store rejects a write
    /// or a read-back after upsert finds no row.
    async fn resolve(&self, request: &ResolutionRequest)
    -> ReferenceResolverResult<ResolutionResult>;
}

/// Errors returned by reference resolver implementations.
#[derive(Debug, Clone, Error)]
pub enum ReferenceResolverError {
    /// The status row could not be read back after the upsert.
    #[error("status row missing after upsert: '{status_text}' from {source_system}")]
    MissingStatusRow {
        /// Raw status text of the missing row.
        status_text: String,
        /// Source-system tag of the missing row.
        source_system: String,
    },

    /// The owner row could not be read back after the upsert.
    #[error("owner row missing after upsert: {0}")]
    MissingOwnerRow(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReferenceResolverError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for ReferenceResolverError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
