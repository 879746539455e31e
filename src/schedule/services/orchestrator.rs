//! Orchestrator: resolves a blueprint's natural keys and builds the final
//! task entity with foreign keys in place.

use crate::schedule::domain::{
    BernieNumber, DevTeamMember, Funder, Loi, Proposal, Reminder, Report, ScheduleDomainError,
    ScheduledTask, TaskBlueprint, TaskCore, TaskCoreBlueprint,
};
use crate::schedule::ports::{
    ReferenceResolver, ReferenceResolverError, ResolutionRequest, ResolutionResult,
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for orchestration.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// Entity construction failed after resolution, e.g. the degenerate
    /// `UNKNOWN` funder placeholder reached validation.
    #[error(transparent)]
    Domain(#[from] ScheduleDomainError),
    /// The reference store rejected the resolution.
    #[error(transparent)]
    Resolver(#[from] ReferenceResolverError),
}

/// Result type for orchestration operations.
pub type OrchestrationResult<T> = Result<T, OrchestrationError>;

/// A resolved task together with its reference entities and resolution
/// metadata, kept for batch-level new-versus-reused accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratedTask {
    /// The final task entity carrying resolved foreign keys.
    pub task: ScheduledTask,
    /// The funder the task belongs to.
    pub funder: Funder,
    /// The owning team member, when the row named one.
    pub owner: Option<DevTeamMember>,
    /// Which reference rows this row's resolution created.
    pub resolution: ResolutionResult,
}

/// Turns blueprints into persistable task entities by resolving their
/// natural keys through a [`ReferenceResolver`].
#[derive(Clone)]
pub struct TaskOrchestrator<R>
where
    R: ReferenceResolver,
{
    resolver: Arc<R>,
}

impl<R> TaskOrchestrator<R>
where
    R: ReferenceResolver,
{
    /// Creates a new orchestrator.
    #[must_use]
    pub const fn new(resolver: Arc<R>) -> Self {
        Self { resolver }
    }

    /// Resolves one blueprint's natural keys and builds the task entity.
    ///
    /// The funder and owner entities are constructed and validated before
    /// the reference store is touched, so a row that cannot form valid
    /// entities writes no reference rows. Resolution then runs atomically,
    /// and the final task copies the blueprint's variant fields verbatim
    /// around the resolved identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::Domain`] when the funder key does not
    /// form a valid identifier, and [`OrchestrationError::Resolver`] when
    /// the reference store fails.
    pub async fn orchestrate(
        &self,
        blueprint: TaskBlueprint,
    ) -> OrchestrationResult<OrchestratedTask> {
        let core = blueprint.core();
        let bernie_number = BernieNumber::new(core.bernie_number.clone())?;
        let funder = Funder::new(bernie_number.clone(), core.funder_name.clone())?;
        let owner = core
            .owner_name
            .clone()
            .map(DevTeamMember::new)
            .transpose()?;

        let resolution = self.resolver.resolve(&to_request(core)).await?;
        let task = build_task(blueprint, bernie_number, &resolution)?;

        Ok(OrchestratedTask {
            task,
            funder,
            owner,
            resolution,
        })
    }
}

fn to_request(core: &TaskCoreBlueprint) -> ResolutionRequest {
    ResolutionRequest::writing_schedule(
        core.bernie_number.clone(),
        core.funder_name.clone(),
        core.owner_name.clone(),
        core.status_text.clone(),
    )
}

fn build_task(
    blueprint: TaskBlueprint,
    bernie_number: BernieNumber,
    resolution: &ResolutionResult,
) -> Result<ScheduledTask, ScheduleDomainError> {
    let task = match blueprint {
        TaskBlueprint::Loi(loi) => ScheduledTask::Loi(Loi {
            core: build_core(loi.core, bernie_number, resolution),
            status: loi.status,
            notification_date: loi.notification_date,
            amount_requested: loi.amount_requested,
            related_proposal_id: loi.related_proposal_id,
            dev_team_notes: loi.dev_team_notes,
        }),
        TaskBlueprint::Proposal(proposal) => ScheduledTask::Proposal(
            Proposal {
                core: build_core(proposal.core, bernie_number, resolution),
                status: proposal.status,
                amount_requested: proposal.amount_requested,
                award_amount: proposal.award_amount,
                submission_date: proposal.submission_date,
                notification_date: proposal.notification_date,
                grant_start_date: proposal.grant_start_date,
                grant_end_date: proposal.grant_end_date,
                communities: proposal.communities,
                members_funded: proposal.members_funded,
                model_funded: proposal.model_funded,
                dev_team_notes: proposal.dev_team_notes,
                grant_goals: proposal.grant_goals,
            }
            .validated()?,
        ),
        TaskBlueprint::Report(report) => ScheduledTask::Report(Report {
            core: build_core(report.core, bernie_number, resolution),
            status: report.status,
            report_type: report.report_type,
            related_proposal_id: report.related_proposal_id,
            submission_date: report.submission_date,
            reporting_period_start: report.reporting_period_start,
            reporting_period_end: report.reporting_period_end,
            acknowledgment_needs: report.acknowledgment_needs,
            dev_team_notes: report.dev_team_notes,
        }),
        TaskBlueprint::Reminder(reminder) => ScheduledTask::Reminder(Reminder {
            core: build_core(reminder.core, bernie_number, resolution),
            reminder_note: reminder.reminder_note,
        }),
    };
    Ok(task)
}

fn build_core(
    core: TaskCoreBlueprint,
    bernie_number: BernieNumber,
    resolution: &ResolutionResult,
) -> TaskCore {
    TaskCore {
        task_id: core.task_id,
        task_type: core.task_type,
        bernie_number,
        status_id: resolution.status_id,
        owner_id: resolution.owner_id,
        deadline: core.deadline,
        deadline_defaulted: core.deadline_defaulted,
        last_modified: core.last_modified,
        fiscal_year: core.fiscal_year,
        program_area: core.program_area,
        initiative: core.initiative,
        opportunity_id: core.opportunity_id,
    }
}
