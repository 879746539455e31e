//! Writing-schedule ingestion for Granary.
//!
//! Turns raw rows from the external writing-schedule table into persisted,
//! cross-referenced grant tasks. Each row is decomposed into one or more
//! task blueprints keyed by natural identifiers, the orchestrator resolves
//! those keys into surrogate foreign keys against the reference store, and
//! the import service persists the resulting entities. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
