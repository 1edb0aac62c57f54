//! ReqStorageEngine: owns the DatabaseManager, exposes typed operations for
//! every table and emits domain events after each committed write.

use std::path::Path;

use chrono::Utc;

use reqlens_core::errors::{ServiceError, StorageError, ValidationError};
use reqlens_core::events::{
    ActualAssessmentRecordedEvent, DiagnosisRunEvent, EventDispatcher, MilestoneAssignedEvent,
    MilestoneChangedEvent, ProjectCreatedEvent, ProjectDeletedEvent, RequirementChangedEvent,
    RequirementStatusChangedEvent, StakeholderChangedEvent,
};
use reqlens_core::lenses::{self, Diagnosis};
use reqlens_core::model::{
    CascadeCounts, Milestone, MilestonePatch, NewMilestone, NewProject, NewRequirement,
    NewStakeholder, Project, ProjectDetail, Requirement, RequirementPatch, Stakeholder,
    StakeholderPatch,
};
use reqlens_core::valuation::ActualAssessment;
use rusqlite::Connection;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::migrations;
use crate::queries::{milestones, projects, requirements, stakeholders};

/// The main storage engine used by the HTTP layer.
pub struct ReqStorageEngine {
    db: DatabaseManager,
    events: EventDispatcher,
}

/// Everything the roadmap lenses need for one project.
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    pub project: Project,
    pub milestones: Vec<Milestone>,
    pub requirements: Vec<Requirement>,
}

/// Outcome of a diagnosis repair.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    /// Diagnosis taken before anything moved.
    pub diagnosis: Diagnosis,
    pub repaired_ids: Vec<i64>,
}

fn require_project(conn: &Connection, id: i64) -> Result<Project, StorageError> {
    projects::get_project(conn, id)?.ok_or_else(|| StorageError::not_found("project", id))
}

fn require_requirement(conn: &Connection, id: i64) -> Result<Requirement, StorageError> {
    requirements::get_requirement(conn, id)?
        .ok_or_else(|| StorageError::not_found("requirement", id))
}

fn require_stakeholder(
    conn: &Connection,
    project_id: i64,
    id: i64,
) -> Result<Stakeholder, StorageError> {
    stakeholders::get_stakeholder(conn, project_id, id)?
        .ok_or_else(|| StorageError::not_found("stakeholder", id))
}

/// A milestone that exists and, when `project_id` is given, belongs to it.
fn require_milestone(
    conn: &Connection,
    project_id: Option<i64>,
    id: i64,
) -> Result<Milestone, StorageError> {
    match milestones::get_milestone(conn, id)? {
        Some(m) if project_id.map_or(true, |pid| pid == m.project_id) => Ok(m),
        _ => Err(StorageError::not_found("milestone", id)),
    }
}

/// Validation failures are carried through the transaction closure as the
/// inner `Err` so the storage error type stays untouched.
type Checked<T> = Result<T, ValidationError>;

fn flatten<T>(outcome: Result<Checked<T>, StorageError>) -> Result<T, ServiceError> {
    Ok(outcome??)
}

impl ReqStorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path, read_pool_size)?,
            events: EventDispatcher::new(),
        })
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
            events: EventDispatcher::new(),
        })
    }

    /// Replace the event dispatcher.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn schema_version(&self) -> Result<u32, StorageError> {
        self.db.with_reader(migrations::current_version)
    }

    // ---- projects ----

    pub fn create_project(&self, new: &NewProject) -> Result<Project, ServiceError> {
        new.validate()?;
        let project = self
            .db
            .with_writer(|conn| projects::insert_project(conn, new, Utc::now()))?;
        self.events.emit_project_created(&ProjectCreatedEvent {
            project_id: project.id,
            name: project.name.clone(),
        });
        Ok(project)
    }

    pub fn list_projects(&self, creator: Option<&str>) -> Result<Vec<Project>, StorageError> {
        self.db.with_reader(|conn| projects::list_projects(conn, creator))
    }

    pub fn get_project(&self, id: i64) -> Result<Project, StorageError> {
        self.db.with_reader(|conn| require_project(conn, id))
    }

    pub fn project_detail(&self, id: i64) -> Result<ProjectDetail, StorageError> {
        self.db.with_reader(|conn| {
            let project = require_project(conn, id)?;
            let counts = projects::child_counts(conn, id)?;
            Ok(ProjectDetail {
                project,
                stakeholder_count: counts.stakeholders,
                requirement_count: counts.requirements,
                milestone_count: counts.milestones,
            })
        })
    }

    /// Delete a project with its stakeholders, requirements and milestones.
    pub fn delete_project(&self, id: i64) -> Result<CascadeCounts, StorageError> {
        let (project, counts) = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let project = require_project(tx, id)?;
                let counts = projects::delete_project_cascade(tx, id)?;
                Ok((project, counts))
            })
        })?;
        self.events.emit_project_deleted(&ProjectDeletedEvent {
            project_id: project.id,
            name: project.name,
            stakeholders_removed: counts.stakeholders,
            requirements_removed: counts.requirements,
            milestones_removed: counts.milestones,
        });
        Ok(counts)
    }

    // ---- stakeholders ----

    pub fn list_stakeholders(&self, project_id: i64) -> Result<Vec<Stakeholder>, StorageError> {
        self.db.with_reader(|conn| {
            require_project(conn, project_id)?;
            stakeholders::list_stakeholders(conn, project_id)
        })
    }

    pub fn create_stakeholder(
        &self,
        project_id: i64,
        new: NewStakeholder,
    ) -> Result<Stakeholder, ServiceError> {
        let mut stakeholder = new.into_stakeholder(project_id)?;
        stakeholder.id = self.db.with_writer(|conn| {
            require_project(conn, project_id)?;
            stakeholders::insert_stakeholder(conn, &stakeholder)
        })?;
        self.events.emit_stakeholder_created(&stakeholder_event(&stakeholder));
        Ok(stakeholder)
    }

    pub fn get_stakeholder(&self, project_id: i64, id: i64) -> Result<Stakeholder, StorageError> {
        self.db.with_reader(|conn| require_stakeholder(conn, project_id, id))
    }

    pub fn update_stakeholder(
        &self,
        project_id: i64,
        id: i64,
        patch: &StakeholderPatch,
    ) -> Result<Stakeholder, ServiceError> {
        let outcome = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let mut s = require_stakeholder(tx, project_id, id)?;
                if let Err(e) = patch.apply(&mut s) {
                    return Ok(Err(e));
                }
                s.updated_at = Utc::now();
                stakeholders::update_stakeholder(tx, &s)?;
                Ok(Ok(s))
            })
        });
        let stakeholder = flatten(outcome)?;
        self.events.emit_stakeholder_updated(&stakeholder_event(&stakeholder));
        Ok(stakeholder)
    }

    pub fn delete_stakeholder(&self, project_id: i64, id: i64) -> Result<(), StorageError> {
        let removed = self.db.with_writer(|conn| {
            let s = require_stakeholder(conn, project_id, id)?;
            stakeholders::delete_stakeholder(conn, project_id, id)?;
            Ok(s)
        })?;
        self.events.emit_stakeholder_deleted(&stakeholder_event(&removed));
        Ok(())
    }

    // ---- requirements ----

    pub fn list_requirements(&self, project_id: i64) -> Result<Vec<Requirement>, StorageError> {
        self.db.with_reader(|conn| {
            require_project(conn, project_id)?;
            requirements::list_requirements(conn, project_id)
        })
    }

    /// A project with its requirements, for the single-list lenses.
    pub fn project_requirements(
        &self,
        project_id: i64,
    ) -> Result<(Project, Vec<Requirement>), StorageError> {
        self.db.with_reader(|conn| {
            let project = require_project(conn, project_id)?;
            Ok((project, requirements::list_requirements(conn, project_id)?))
        })
    }

    pub fn create_requirement(
        &self,
        project_id: i64,
        new: NewRequirement,
    ) -> Result<Requirement, ServiceError> {
        let mut requirement = new.into_requirement(project_id)?;
        requirement.id = self.db.with_writer(|conn| {
            require_project(conn, project_id)?;
            requirements::insert_requirement(conn, &requirement)
        })?;
        self.events.emit_requirement_created(&requirement_event(&requirement));
        Ok(requirement)
    }

    pub fn get_requirement(&self, id: i64) -> Result<Requirement, StorageError> {
        self.db.with_reader(|conn| require_requirement(conn, id))
    }

    pub fn update_requirement(
        &self,
        id: i64,
        patch: &RequirementPatch,
    ) -> Result<Requirement, ServiceError> {
        patch.validate()?;
        let outcome = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let mut r = require_requirement(tx, id)?;
                if let Err(e) = patch.apply(&mut r) {
                    return Ok(Err(e));
                }
                r.updated_at = Utc::now();
                requirements::update_requirement(tx, &r)?;
                Ok(Ok(r))
            })
        });
        let requirement = flatten(outcome)?;
        self.events.emit_requirement_updated(&requirement_event(&requirement));
        Ok(requirement)
    }

    /// Overwrite status and/or priority. Absent values stay unchanged.
    pub fn set_status_priority(
        &self,
        id: i64,
        status: Option<String>,
        priority: Option<String>,
    ) -> Result<Requirement, StorageError> {
        let requirement = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let mut r = require_requirement(tx, id)?;
                if let Some(ref s) = status {
                    r.status = s.clone();
                }
                if let Some(ref p) = priority {
                    r.priority = p.clone();
                }
                r.updated_at = Utc::now();
                requirements::update_requirement(tx, &r)?;
                Ok(r)
            })
        })?;
        self.events.emit_requirement_status_changed(&RequirementStatusChangedEvent {
            requirement_id: id,
            status,
            priority,
        });
        Ok(requirement)
    }

    /// Assign a requirement to a milestone, or clear the assignment with `None`.
    pub fn assign_milestone(
        &self,
        id: i64,
        milestone_id: Option<i64>,
    ) -> Result<Requirement, StorageError> {
        let requirement = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let mut r = require_requirement(tx, id)?;
                if let Some(mid) = milestone_id {
                    require_milestone(tx, None, mid)?;
                }
                r.assigned_milestone_id = milestone_id;
                r.updated_at = Utc::now();
                requirements::set_assigned_milestone(tx, id, milestone_id, r.updated_at)?;
                Ok(r)
            })
        })?;
        self.events.emit_milestone_assigned(&MilestoneAssignedEvent {
            requirement_id: id,
            milestone_id,
        });
        Ok(requirement)
    }

    pub fn record_actual_assessment(
        &self,
        id: i64,
        assessment: &ActualAssessment,
    ) -> Result<Requirement, ServiceError> {
        assessment.validate()?;
        let requirement = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let mut r = require_requirement(tx, id)?;
                let now = Utc::now();
                assessment.apply(&mut r, now);
                r.updated_at = now;
                requirements::update_requirement(tx, &r)?;
                Ok(r)
            })
        })?;
        self.events.emit_actual_assessment_recorded(&ActualAssessmentRecordedEvent {
            requirement_id: id,
            assessor: requirement.assessment.actual_value_assessor.clone(),
            actual_roi: requirement.assessment.actual_roi,
        });
        Ok(requirement)
    }

    pub fn delete_requirement(&self, id: i64) -> Result<(), StorageError> {
        let removed = self.db.with_writer(|conn| {
            let r = require_requirement(conn, id)?;
            requirements::delete_requirement(conn, id)?;
            Ok(r)
        })?;
        self.events.emit_requirement_deleted(&requirement_event(&removed));
        Ok(())
    }

    // ---- milestones ----

    /// Milestones by deadline, undated last.
    pub fn list_milestones(&self, project_id: i64) -> Result<Vec<Milestone>, StorageError> {
        self.db.with_reader(|conn| {
            require_project(conn, project_id)?;
            milestones::list_milestones(conn, project_id)
        })
    }

    /// A project with its milestones and requirements, read in one go.
    pub fn project_snapshot(&self, project_id: i64) -> Result<ProjectSnapshot, StorageError> {
        self.db.with_reader(|conn| {
            let project = require_project(conn, project_id)?;
            Ok(ProjectSnapshot {
                project,
                milestones: milestones::list_milestones(conn, project_id)?,
                requirements: requirements::list_requirements(conn, project_id)?,
            })
        })
    }

    pub fn create_milestone(
        &self,
        project_id: i64,
        new: NewMilestone,
    ) -> Result<Milestone, ServiceError> {
        let mut milestone = new.into_milestone(project_id)?;
        milestone.id = self.db.with_writer(|conn| {
            require_project(conn, project_id)?;
            milestones::insert_milestone(conn, &milestone)
        })?;
        self.events.emit_milestone_created(&milestone_event(&milestone));
        Ok(milestone)
    }

    pub fn get_milestone(&self, project_id: i64, id: i64) -> Result<Milestone, StorageError> {
        self.db.with_reader(|conn| require_milestone(conn, Some(project_id), id))
    }

    pub fn update_milestone(
        &self,
        project_id: i64,
        id: i64,
        patch: &MilestonePatch,
    ) -> Result<Milestone, ServiceError> {
        let outcome = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let mut m = require_milestone(tx, Some(project_id), id)?;
                if let Err(e) = patch.apply(&mut m) {
                    return Ok(Err(e));
                }
                m.updated_at = Utc::now();
                milestones::update_milestone(tx, &m)?;
                Ok(Ok(m))
            })
        });
        let milestone = flatten(outcome)?;
        self.events.emit_milestone_updated(&milestone_event(&milestone));
        Ok(milestone)
    }

    /// Replace a milestone's requirement id list.
    pub fn set_milestone_requirements(
        &self,
        id: i64,
        requirement_ids: Vec<i64>,
    ) -> Result<Milestone, StorageError> {
        let milestone = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let mut m = require_milestone(tx, None, id)?;
                m.requirements = requirement_ids;
                m.updated_at = Utc::now();
                milestones::set_requirement_ids(tx, id, &m.requirements, m.updated_at)?;
                Ok(m)
            })
        })?;
        self.events.emit_milestone_updated(&milestone_event(&milestone));
        Ok(milestone)
    }

    /// Delete a milestone; requirements assigned to it become unassigned.
    pub fn delete_milestone(&self, project_id: i64, id: i64) -> Result<(), StorageError> {
        let removed = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let m = require_milestone(tx, Some(project_id), id)?;
                milestones::delete_milestone(tx, id)?;
                Ok(m)
            })
        })?;
        self.events.emit_milestone_deleted(&milestone_event(&removed));
        Ok(())
    }

    // ---- diagnosis ----

    /// Read-only ownership check of every stored requirement against a project.
    pub fn diagnose(&self, project_id: i64) -> Result<Diagnosis, StorageError> {
        let diagnosis = self.db.with_reader(|conn| diagnose_with(conn, project_id))?;
        self.events.emit_diagnosis_run(&diagnosis_event(&diagnosis, 0));
        Ok(diagnosis)
    }

    /// Move orphaned requirements whose title mentions the project into it.
    pub fn repair_requirements(&self, project_id: i64) -> Result<RepairOutcome, StorageError> {
        let outcome = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let diagnosis = diagnose_with(tx, project_id)?;
                let ids = diagnosis.repairable_ids();
                requirements::reassign_project(tx, &ids, project_id, Utc::now())?;
                Ok(RepairOutcome {
                    diagnosis,
                    repaired_ids: ids,
                })
            })
        })?;
        if !outcome.repaired_ids.is_empty() {
            tracing::info!(
                project_id,
                repaired = outcome.repaired_ids.len(),
                "reassigned orphaned requirements"
            );
        }
        self.events
            .emit_diagnosis_run(&diagnosis_event(&outcome.diagnosis, outcome.repaired_ids.len()));
        Ok(outcome)
    }
}

fn diagnose_with(conn: &Connection, project_id: i64) -> Result<Diagnosis, StorageError> {
    let project = require_project(conn, project_id)?;
    let all = requirements::list_all_requirements(conn)?;
    let existing = projects::list_project_ids(conn)?;
    Ok(lenses::diagnose(&project, &all, &existing))
}

fn stakeholder_event(s: &Stakeholder) -> StakeholderChangedEvent {
    StakeholderChangedEvent {
        project_id: s.project_id,
        stakeholder_id: s.id,
        name: s.name.clone(),
    }
}

fn requirement_event(r: &Requirement) -> RequirementChangedEvent {
    RequirementChangedEvent {
        project_id: r.project_id,
        requirement_id: r.id,
        title: r.title.clone(),
    }
}

fn milestone_event(m: &Milestone) -> MilestoneChangedEvent {
    MilestoneChangedEvent {
        project_id: m.project_id,
        milestone_id: m.id,
        title: m.title.clone(),
    }
}

fn diagnosis_event(d: &Diagnosis, repaired: usize) -> DiagnosisRunEvent {
    DiagnosisRunEvent {
        project_id: d.project_id,
        correct: d.correct_requirements_count,
        orphaned: d.orphaned_requirements_count,
        incorrect: d.incorrect_requirements_count,
        repaired,
    }
}
