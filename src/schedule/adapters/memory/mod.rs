//! In-memory adapters for unit testing.

mod resolver;
mod task_store;

pub use resolver::InMemoryReferenceResolver;
pub use task_store::InMemoryTaskStore;
