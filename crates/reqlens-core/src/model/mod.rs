//! Domain model: projects, stakeholders, requirements and milestones, with
//! their create payloads and partial-update patches.

pub mod de;
pub mod milestone;
pub mod project;
pub mod requirement;
pub mod stakeholder;
pub mod status;

pub use milestone::{Milestone, MilestonePatch, NewMilestone};
pub use project::{CascadeCounts, NewProject, Project, ProjectDetail};
pub use requirement::{
    InsightData, KanoData, NewRequirement, NineElements, Requirement, RequirementAnalysis,
    RequirementPatch, SmartData, ValueAssessment, VsmData, WfmtData,
};
pub use stakeholder::{NewStakeholder, Stakeholder, StakeholderPatch};
