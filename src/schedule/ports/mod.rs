//! Port traits decoupling schedule services from storage technology.

mod resolver;
mod task_store;

pub use resolver::{
    ReferenceResolver, ReferenceResolverError, ReferenceResolverResult, ResolutionRequest,
    ResolutionResult,
};
pub use task_store::{TaskStore, TaskStoreError, TaskStoreResult};
