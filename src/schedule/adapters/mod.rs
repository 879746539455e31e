//! Storage adapters implementing the schedule ports.

pub mod memory;
pub mod postgres;
