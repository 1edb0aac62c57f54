//! ReqEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling reqlens domain events.
///
/// Handlers only override the events they care about. `Send + Sync` is
/// required because the dispatcher is shared across request tasks.
pub trait ReqEventHandler: Send + Sync {
    // ---- Projects ----
    fn on_project_created(&self, _event: &ProjectCreatedEvent) {}
    fn on_project_deleted(&self, _event: &ProjectDeletedEvent) {}

    // ---- Stakeholders ----
    fn on_stakeholder_created(&self, _event: &StakeholderChangedEvent) {}
    fn on_stakeholder_updated(&self, _event: &StakeholderChangedEvent) {}
    fn on_stakeholder_deleted(&self, _event: &StakeholderChangedEvent) {}

    // ---- Requirements ----
    fn on_requirement_created(&self, _event: &RequirementChangedEvent) {}
    fn on_requirement_updated(&self, _event: &RequirementChangedEvent) {}
    fn on_requirement_deleted(&self, _event: &RequirementChangedEvent) {}
    fn on_requirement_status_changed(&self, _event: &RequirementStatusChangedEvent) {}
    fn on_actual_assessment_recorded(&self, _event: &ActualAssessmentRecordedEvent) {}

    // ---- Milestones ----
    fn on_milestone_created(&self, _event: &MilestoneChangedEvent) {}
    fn on_milestone_updated(&self, _event: &MilestoneChangedEvent) {}
    fn on_milestone_deleted(&self, _event: &MilestoneChangedEvent) {}
    fn on_milestone_assigned(&self, _event: &MilestoneAssignedEvent) {}

    // ---- Maintenance ----
    fn on_diagnosis_run(&self, _event: &DiagnosisRunEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
