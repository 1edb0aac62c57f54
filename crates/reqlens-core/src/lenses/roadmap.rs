//! Milestone-centred roadmap views.

use chrono::NaiveDate;
use serde::Serialize;

use super::RequirementCard;
use crate::model::status::{
    ANALYZING, COLLECTED, COMPLETED, CONFIRMED, HIGH, IN_PROGRESS, LOW, MEDIUM, REJECTED,
};
use crate::model::{Milestone, Requirement};

/// The requirements listed on a milestone, in requirement-list order.
/// Ids that do not resolve to a requirement in `requirements` are skipped.
pub fn milestone_requirements<'a>(
    milestone: &Milestone,
    requirements: &'a [Requirement],
) -> Vec<&'a Requirement> {
    requirements
        .iter()
        .filter(|r| milestone.requirements.contains(&r.id))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapMilestone {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    pub requirements: Vec<RequirementCard>,
}

pub fn roadmap_milestones(
    milestones: &[Milestone],
    requirements: &[Requirement],
) -> Vec<RoadmapMilestone> {
    milestones
        .iter()
        .map(|m| RoadmapMilestone {
            id: m.id,
            title: m.title.clone(),
            description: m.description.clone(),
            deadline: m.deadline,
            status: m.status.clone(),
            requirements: milestone_requirements(m, requirements)
                .into_iter()
                .map(RequirementCard::from)
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub collected: usize,
    pub analyzing: usize,
    pub confirmed: usize,
    pub rejected: usize,
    pub in_progress: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub id: i64,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    pub requirements_count: usize,
    pub priority_counts: PriorityCounts,
    pub status_counts: StatusCounts,
}

/// Counts for one milestone. Priorities and statuses outside the known
/// vocabularies are not counted, but still add to `requirements_count`.
pub fn timeline_entry(milestone: &Milestone, requirements: &[Requirement]) -> TimelineEntry {
    let assigned = milestone_requirements(milestone, requirements);
    let mut priority_counts = PriorityCounts::default();
    let mut status_counts = StatusCounts::default();
    for r in &assigned {
        match r.priority.as_str() {
            HIGH => priority_counts.high += 1,
            MEDIUM => priority_counts.medium += 1,
            LOW => priority_counts.low += 1,
            _ => {}
        }
        match r.status.as_str() {
            COLLECTED => status_counts.collected += 1,
            ANALYZING => status_counts.analyzing += 1,
            CONFIRMED => status_counts.confirmed += 1,
            REJECTED => status_counts.rejected += 1,
            IN_PROGRESS => status_counts.in_progress += 1,
            COMPLETED => status_counts.completed += 1,
            _ => {}
        }
    }
    TimelineEntry {
        id: milestone.id,
        title: milestone.title.clone(),
        deadline: milestone.deadline,
        requirements_count: assigned.len(),
        priority_counts,
        status_counts,
    }
}

pub fn timeline(milestones: &[Milestone], requirements: &[Requirement]) -> Vec<TimelineEntry> {
    milestones
        .iter()
        .map(|m| timeline_entry(m, requirements))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::lenses::fixtures::req;

    fn milestone(ids: Vec<i64>) -> Milestone {
        let now = Utc::now();
        Milestone {
            id: 1,
            project_id: 1,
            title: "v1".into(),
            description: None,
            deadline: NaiveDate::from_ymd_opt(2025, 1, 31),
            status: "planned".into(),
            requirements: ids,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn milestone_requirements_follow_requirement_order() {
        let reqs = vec![
            req(1, "collected", "high"),
            req(2, "collected", "low"),
            req(3, "collected", "low"),
        ];
        let m = milestone(vec![3, 1, 99]);
        let ids: Vec<i64> = milestone_requirements(&m, &reqs).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn timeline_counts_known_values_only() {
        let reqs = vec![
            req(1, "in_progress", "high"),
            req(2, "completed", "critical"),
            req(3, "blocked", "low"),
            req(4, "collected", "low"),
        ];
        let entry = timeline_entry(&milestone(vec![1, 2, 3]), &reqs);
        assert_eq!(entry.requirements_count, 3);
        assert_eq!(
            entry.priority_counts,
            PriorityCounts {
                high: 1,
                medium: 0,
                low: 1
            }
        );
        assert_eq!(entry.status_counts.in_progress, 1);
        assert_eq!(entry.status_counts.completed, 1);
        assert_eq!(entry.status_counts.collected, 0);
    }

    #[test]
    fn roadmap_embeds_cards() {
        let reqs = vec![req(5, "confirmed", "high")];
        let roadmap = roadmap_milestones(&[milestone(vec![5])], &reqs);
        assert_eq!(roadmap[0].requirements.len(), 1);
        assert_eq!(roadmap[0].requirements[0].status, "confirmed");
    }
}
