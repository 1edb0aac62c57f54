//! Counting lenses for the analysis dashboards.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RequirementCard;
use crate::constants::UNKNOWN;
use crate::model::{Project, Requirement};

fn count_by<'a>(
    requirements: &'a [Requirement],
    key: impl Fn(&'a Requirement) -> &'a str,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in requirements {
        *counts.entry(key(r).to_string()).or_insert(0) += 1;
    }
    counts
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN
    } else {
        value
    }
}

/// Requirement counts keyed by the raw `priority` value.
pub fn priority_stats(requirements: &[Requirement]) -> BTreeMap<String, usize> {
    count_by(requirements, |r| r.priority.as_str())
}

/// Requirement counts keyed by the raw `category` value.
pub fn category_stats(requirements: &[Requirement]) -> BTreeMap<String, usize> {
    count_by(requirements, |r| r.category.as_str())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOverview {
    pub requirements: Vec<RequirementCard>,
    pub priority_stats: BTreeMap<String, usize>,
    pub category_stats: BTreeMap<String, usize>,
}

pub fn analysis_overview(requirements: &[Requirement]) -> AnalysisOverview {
    AnalysisOverview {
        requirements: requirements.iter().map(RequirementCard::from).collect(),
        priority_stats: priority_stats(requirements),
        category_stats: category_stats(requirements),
    }
}

/// Project fields echoed at the top of the comprehensive analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectHeader {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for ProjectHeader {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveAnalysis {
    pub project: ProjectHeader,
    pub requirements_count: usize,
    pub requirements_by_status: BTreeMap<String, usize>,
    pub requirements_by_priority: BTreeMap<String, usize>,
    pub requirements_by_type: BTreeMap<String, usize>,
}

/// Totals by status, priority and requirement type. Blank values count as `unknown`.
pub fn comprehensive_analysis(
    project: &Project,
    requirements: &[Requirement],
) -> ComprehensiveAnalysis {
    ComprehensiveAnalysis {
        project: project.into(),
        requirements_count: requirements.len(),
        requirements_by_status: count_by(requirements, |r| or_unknown(&r.status)),
        requirements_by_priority: count_by(requirements, |r| or_unknown(&r.priority)),
        requirements_by_type: count_by(requirements, |r| or_unknown(&r.requirement_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lenses::fixtures::req;

    #[test]
    fn raw_value_counts() {
        let mut a = req(1, "collected", "high");
        a.category = "security".into();
        let b = req(2, "collected", "high");
        let c = req(3, "collected", "low");

        let reqs = [a, b, c];
        let priorities = priority_stats(&reqs);
        assert_eq!(priorities.get("high"), Some(&2));
        assert_eq!(priorities.get("low"), Some(&1));
        let categories = category_stats(&reqs);
        assert_eq!(categories.get("functional"), Some(&2));
        assert_eq!(categories.get("security"), Some(&1));
    }

    #[test]
    fn comprehensive_counts_blanks_as_unknown() {
        let now = Utc::now();
        let project = Project {
            id: 9,
            name: "CRM".into(),
            description: None,
            creator: None,
            created_at: now,
            updated_at: now,
        };
        let mut a = req(1, "", "high");
        a.requirement_type = "feature".into();
        let b = req(2, "confirmed", " ");

        let analysis = comprehensive_analysis(&project, &[a, b]);
        assert_eq!(analysis.project.id, 9);
        assert_eq!(analysis.project.name, "CRM");
        assert_eq!(analysis.requirements_count, 2);
        assert_eq!(analysis.requirements_by_status.get("unknown"), Some(&1));
        assert_eq!(analysis.requirements_by_status.get("confirmed"), Some(&1));
        assert_eq!(analysis.requirements_by_priority.get("unknown"), Some(&1));
        assert_eq!(analysis.requirements_by_type.get("unknown"), Some(&1));
        assert_eq!(analysis.requirements_by_type.get("feature"), Some(&1));
    }
}
