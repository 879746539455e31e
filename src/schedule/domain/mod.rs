//! Domain model for writing-schedule ingestion.
//!
//! Pure types and pure functions only: validated identifiers, reference
//! entities, blueprints keyed by natural identifiers, task entities keyed
//! by resolved foreign keys, and the status semantics table. No storage
//! access crosses this boundary.

mod blueprint;
mod error;
mod funder;
mod ids;
mod member;
pub mod parse;
mod row;
pub mod semantics;
mod status;
mod task;

pub use blueprint::{
    LoiBlueprint, ProposalBlueprint, ReminderBlueprint, ReportBlueprint, TaskBlueprint,
    TaskCoreBlueprint,
};
pub use error::{ParseStatusError, ScheduleDomainError};
pub use funder::Funder;
pub use ids::{BernieNumber, Ein, MemberId, StatusId};
pub use member::DevTeamMember;
pub use row::WritingScheduleRow;
pub use semantics::{StatusSemantics, WorkflowState};
pub use status::{
    LoiStatus, ProposalStatus, RawStatus, ReportStatus, WRITING_SCHEDULE_SOURCE,
};
pub use task::{Loi, Proposal, Reminder, Report, ScheduledTask, TaskCore, TaskKind};
