//! Event payload types for reqlens domain events.

/// Payload for `on_project_created`.
#[derive(Debug, Clone)]
pub struct ProjectCreatedEvent {
    pub project_id: i64,
    pub name: String,
}

/// Payload for `on_project_deleted`. Counts are the rows removed by the cascade.
#[derive(Debug, Clone)]
pub struct ProjectDeletedEvent {
    pub project_id: i64,
    pub name: String,
    pub stakeholders_removed: usize,
    pub requirements_removed: usize,
    pub milestones_removed: usize,
}

/// Payload for stakeholder create/update/delete.
#[derive(Debug, Clone)]
pub struct StakeholderChangedEvent {
    pub project_id: i64,
    pub stakeholder_id: i64,
    pub name: String,
}

/// Payload for requirement create/update/delete.
#[derive(Debug, Clone)]
pub struct RequirementChangedEvent {
    pub project_id: i64,
    pub requirement_id: i64,
    pub title: String,
}

/// Payload for `on_requirement_status_changed`.
#[derive(Debug, Clone)]
pub struct RequirementStatusChangedEvent {
    pub requirement_id: i64,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Payload for milestone create/update/delete.
#[derive(Debug, Clone)]
pub struct MilestoneChangedEvent {
    pub project_id: i64,
    pub milestone_id: i64,
    pub title: String,
}

/// Payload for `on_milestone_assigned`. `None` means the assignment was cleared.
#[derive(Debug, Clone)]
pub struct MilestoneAssignedEvent {
    pub requirement_id: i64,
    pub milestone_id: Option<i64>,
}

/// Payload for `on_actual_assessment_recorded`.
#[derive(Debug, Clone)]
pub struct ActualAssessmentRecordedEvent {
    pub requirement_id: i64,
    pub assessor: Option<String>,
    pub actual_roi: f64,
}

/// Payload for `on_diagnosis_run`.
#[derive(Debug, Clone)]
pub struct DiagnosisRunEvent {
    pub project_id: i64,
    pub correct: usize,
    pub orphaned: usize,
    pub incorrect: usize,
    /// Requirements reassigned to the project; 0 for a read-only diagnosis.
    pub repaired: usize,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
