//! EventDispatcher: synchronous fan-out to registered handlers.

use std::sync::Arc;

use super::handler::ReqEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// With no handlers registered, every `emit_*` is a loop over an empty Vec.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ReqEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn ReqEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and skipped; later handlers still run.
    fn emit<F: Fn(&dyn ReqEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Projects ----
    pub fn emit_project_created(&self, event: &ProjectCreatedEvent) {
        self.emit(|h| h.on_project_created(event));
    }

    pub fn emit_project_deleted(&self, event: &ProjectDeletedEvent) {
        self.emit(|h| h.on_project_deleted(event));
    }

    // ---- Stakeholders ----
    pub fn emit_stakeholder_created(&self, event: &StakeholderChangedEvent) {
        self.emit(|h| h.on_stakeholder_created(event));
    }

    pub fn emit_stakeholder_updated(&self, event: &StakeholderChangedEvent) {
        self.emit(|h| h.on_stakeholder_updated(event));
    }

    pub fn emit_stakeholder_deleted(&self, event: &StakeholderChangedEvent) {
        self.emit(|h| h.on_stakeholder_deleted(event));
    }

    // ---- Requirements ----
    pub fn emit_requirement_created(&self, event: &RequirementChangedEvent) {
        self.emit(|h| h.on_requirement_created(event));
    }

    pub fn emit_requirement_updated(&self, event: &RequirementChangedEvent) {
        self.emit(|h| h.on_requirement_updated(event));
    }

    pub fn emit_requirement_deleted(&self, event: &RequirementChangedEvent) {
        self.emit(|h| h.on_requirement_deleted(event));
    }

    pub fn emit_requirement_status_changed(&self, event: &RequirementStatusChangedEvent) {
        self.emit(|h| h.on_requirement_status_changed(event));
    }

    pub fn emit_actual_assessment_recorded(&self, event: &ActualAssessmentRecordedEvent) {
        self.emit(|h| h.on_actual_assessment_recorded(event));
    }

    // ---- Milestones ----
    pub fn emit_milestone_created(&self, event: &MilestoneChangedEvent) {
        self.emit(|h| h.on_milestone_created(event));
    }

    pub fn emit_milestone_updated(&self, event: &MilestoneChangedEvent) {
        self.emit(|h| h.on_milestone_updated(event));
    }

    pub fn emit_milestone_deleted(&self, event: &MilestoneChangedEvent) {
        self.emit(|h| h.on_milestone_deleted(event));
    }

    pub fn emit_milestone_assigned(&self, event: &MilestoneAssignedEvent) {
        self.emit(|h| h.on_milestone_assigned(event));
    }

    // ---- Maintenance ----
    pub fn emit_diagnosis_run(&self, event: &DiagnosisRunEvent) {
        self.emit(|h| h.on_diagnosis_run(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}
