//! Granary: grant writing-schedule ingestion.
//!
//! This crate turns rows exported from an external writing-schedule table
//! into cross-referenced grant tasks backed by a reference store of
//! funders, raw statuses, and development team members.
//!
//! # Architecture
//!
//! Granary follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`schedule`]: Row decomposition, natural-key resolution, and task
//!   persistence

pub mod schedule;
