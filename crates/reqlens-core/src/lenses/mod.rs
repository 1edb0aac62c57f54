//! Read-only views over a project's requirements and milestones.
//!
//! Every lens is a single pass over in-memory lists loaded by the storage
//! layer; none of them touch the database.

pub mod board;
pub mod diagnose;
pub mod practices;
pub mod roadmap;
pub mod stats;

use serde::Serialize;

use crate::model::Requirement;

pub use board::{
    kanban_board, kano_groups, roadmap_status_groups, KanbanBoard, KanoGroups, RoadmapStatusGroups,
};
pub use diagnose::{diagnose, DiagnosedRequirement, Diagnosis};
pub use practices::{smart_entries, vsm_entries, wfmt_entries, SmartEntry, VsmEntry, WfmtEntry};
pub use roadmap::{
    milestone_requirements, roadmap_milestones, timeline, timeline_entry, RoadmapMilestone,
    TimelineEntry,
};
pub use stats::{
    analysis_overview, category_stats, comprehensive_analysis, priority_stats, AnalysisOverview,
    ComprehensiveAnalysis, ProjectHeader,
};

/// Compact requirement view shared by the board and roadmap lenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub source: String,
    pub priority: String,
    pub status: String,
    pub category: String,
    pub kano_category: Option<String>,
    pub estimated_roi: f64,
    pub actual_roi: f64,
}

impl From<&Requirement> for RequirementCard {
    fn from(r: &Requirement) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            description: r.summary(),
            source: r.source.clone(),
            priority: r.priority.clone(),
            status: r.status.clone(),
            category: r.category.clone(),
            kano_category: r.analysis.kano.kano_category.clone(),
            estimated_roi: r.assessment.estimated_roi,
            actual_roi: r.assessment.actual_roi,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::Requirement;

    pub fn req(id: i64, status: &str, priority: &str) -> Requirement {
        let mut r = Requirement::new(1, format!("req {id}"));
        r.id = id;
        r.status = status.to_string();
        r.priority = priority.to_string();
        r
    }
}
