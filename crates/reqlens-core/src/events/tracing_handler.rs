//! Handler that turns domain events into structured `tracing` records.

use super::handler::ReqEventHandler;
use super::types::*;

/// Default handler installed by the server.
/// Creations and updates log at `debug`; deletions and repairs at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventHandler;

impl ReqEventHandler for TracingEventHandler {
    fn on_project_created(&self, e: &ProjectCreatedEvent) {
        tracing::debug!(project_id = e.project_id, name = %e.name, "project created");
    }

    fn on_project_deleted(&self, e: &ProjectDeletedEvent) {
        tracing::info!(
            project_id = e.project_id,
            name = %e.name,
            stakeholders = e.stakeholders_removed,
            requirements = e.requirements_removed,
            milestones = e.milestones_removed,
            "project deleted"
        );
    }

    fn on_stakeholder_created(&self, e: &StakeholderChangedEvent) {
        tracing::debug!(
            project_id = e.project_id,
            stakeholder_id = e.stakeholder_id,
            name = %e.name,
            "stakeholder created"
        );
    }

    fn on_stakeholder_updated(&self, e: &StakeholderChangedEvent) {
        tracing::debug!(stakeholder_id = e.stakeholder_id, name = %e.name, "stakeholder updated");
    }

    fn on_stakeholder_deleted(&self, e: &StakeholderChangedEvent) {
        tracing::info!(
            project_id = e.project_id,
            stakeholder_id = e.stakeholder_id,
            name = %e.name,
            "stakeholder deleted"
        );
    }

    fn on_requirement_created(&self, e: &RequirementChangedEvent) {
        tracing::debug!(
            project_id = e.project_id,
            requirement_id = e.requirement_id,
            title = %e.title,
            "requirement created"
        );
    }

    fn on_requirement_updated(&self, e: &RequirementChangedEvent) {
        tracing::debug!(requirement_id = e.requirement_id, title = %e.title, "requirement updated");
    }

    fn on_requirement_deleted(&self, e: &RequirementChangedEvent) {
        tracing::info!(
            project_id = e.project_id,
            requirement_id = e.requirement_id,
            title = %e.title,
            "requirement deleted"
        );
    }

    fn on_requirement_status_changed(&self, e: &RequirementStatusChangedEvent) {
        tracing::debug!(
            requirement_id = e.requirement_id,
            status = ?e.status,
            priority = ?e.priority,
            "requirement status changed"
        );
    }

    fn on_actual_assessment_recorded(&self, e: &ActualAssessmentRecordedEvent) {
        tracing::debug!(
            requirement_id = e.requirement_id,
            assessor = ?e.assessor,
            actual_roi = e.actual_roi,
            "actual value assessment recorded"
        );
    }

    fn on_milestone_created(&self, e: &MilestoneChangedEvent) {
        tracing::debug!(
            project_id = e.project_id,
            milestone_id = e.milestone_id,
            title = %e.title,
            "milestone created"
        );
    }

    fn on_milestone_updated(&self, e: &MilestoneChangedEvent) {
        tracing::debug!(milestone_id = e.milestone_id, title = %e.title, "milestone updated");
    }

    fn on_milestone_deleted(&self, e: &MilestoneChangedEvent) {
        tracing::info!(
            project_id = e.project_id,
            milestone_id = e.milestone_id,
            title = %e.title,
            "milestone deleted"
        );
    }

    fn on_milestone_assigned(&self, e: &MilestoneAssignedEvent) {
        tracing::debug!(
            requirement_id = e.requirement_id,
            milestone_id = ?e.milestone_id,
            "milestone assignment changed"
        );
    }

    fn on_diagnosis_run(&self, e: &DiagnosisRunEvent) {
        if e.repaired > 0 {
            tracing::info!(
                project_id = e.project_id,
                repaired = e.repaired,
                "orphaned requirements reassigned"
            );
        } else {
            tracing::debug!(
                project_id = e.project_id,
                correct = e.correct,
                orphaned = e.orphaned,
                incorrect = e.incorrect,
                "requirement diagnosis"
            );
        }
    }

    fn on_error(&self, e: &ErrorEvent) {
        tracing::error!(code = %e.error_code, "{}", e.message);
    }
}
