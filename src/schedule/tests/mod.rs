//! Unit tests for the schedule module.
//!
//! Tests are organised by pipeline stage, covering happy paths, error
//! cases, and edge cases for all public APIs.

mod adapters_tests;
mod decomposer_tests;
mod import_tests;
