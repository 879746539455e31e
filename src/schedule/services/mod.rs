//! Application services for schedule ingestion.

mod batch;
pub mod decomposer;
mod import;
mod orchestrator;

pub use batch::{BatchError, BatchOrchestrator, BatchOutcome};
pub use decomposer::{DecomposeError, DecomposeResult, decompose_row};
pub use import::{ImportSummary, ScheduleImportService};
pub use orchestrator::{
    OrchestratedTask, OrchestrationError, OrchestrationResult, TaskOrchestrator,
};
