//! Cross-project consistency check for requirement ownership.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{Project, Requirement};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosedRequirement {
    pub id: i64,
    pub title: String,
    pub project_id: i64,
    pub status: String,
    pub category: String,
    pub priority: String,
}

impl From<&Requirement> for DiagnosedRequirement {
    fn from(r: &Requirement) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            project_id: r.project_id,
            status: r.status.clone(),
            category: r.category.clone(),
            priority: r.priority.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub project_id: i64,
    pub project_name: String,
    pub total_requirements: usize,
    pub correct_requirements_count: usize,
    pub incorrect_requirements_count: usize,
    pub orphaned_requirements_count: usize,
    pub potential_requirements_count: usize,
    pub correct_requirements: Vec<DiagnosedRequirement>,
    pub orphaned_requirements: Vec<DiagnosedRequirement>,
    /// Orphaned or misplaced requirements whose title mentions this project.
    pub potential_requirements: Vec<DiagnosedRequirement>,
}

impl Diagnosis {
    /// Orphaned requirements that look like they belong to this project.
    pub fn repairable_ids(&self) -> Vec<i64> {
        let orphaned: HashSet<i64> = self.orphaned_requirements.iter().map(|r| r.id).collect();
        self.potential_requirements
            .iter()
            .filter(|r| orphaned.contains(&r.id))
            .map(|r| r.id)
            .collect()
    }
}

/// Partition every requirement in the store relative to `project`.
///
/// * correct: owned by `project`
/// * orphaned: project id 0 or an id with no project row
/// * incorrect: owned by another existing project
pub fn diagnose(
    project: &Project,
    all_requirements: &[Requirement],
    existing_project_ids: &[i64],
) -> Diagnosis {
    let existing: HashSet<i64> = existing_project_ids.iter().copied().collect();
    let id_text = project.id.to_string();

    let mut correct = Vec::new();
    let mut orphaned = Vec::new();
    let mut incorrect_count = 0;
    let mut potential = Vec::new();

    for r in all_requirements {
        if r.project_id == project.id {
            correct.push(DiagnosedRequirement::from(r));
            continue;
        }
        if r.project_id == 0 || !existing.contains(&r.project_id) {
            orphaned.push(DiagnosedRequirement::from(r));
        } else {
            incorrect_count += 1;
        }
        if r.title.contains(&id_text) || r.title.contains(&project.name) {
            potential.push(DiagnosedRequirement::from(r));
        }
    }

    Diagnosis {
        project_id: project.id,
        project_name: project.name.clone(),
        total_requirements: all_requirements.len(),
        correct_requirements_count: correct.len(),
        incorrect_requirements_count: incorrect_count,
        orphaned_requirements_count: orphaned.len(),
        potential_requirements_count: potential.len(),
        correct_requirements: correct,
        orphaned_requirements: orphaned,
        potential_requirements: potential,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn project(id: i64, name: &str) -> Project {
        let now = Utc::now();
        Project {
            id,
            name: name.into(),
            description: None,
            creator: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn owned(id: i64, project_id: i64, title: &str) -> Requirement {
        let mut r = Requirement::new(project_id, title);
        r.id = id;
        r
    }

    #[test]
    fn partitions_and_finds_potential_matches() {
        let p = project(2, "Billing");
        let reqs = vec![
            owned(1, 2, "invoice pdf"),
            owned(2, 0, "Billing retries"),
            owned(3, 7, "dangling"),
            owned(4, 3, "project 2 export"),
            owned(5, 3, "unrelated"),
        ];
        let d = diagnose(&p, &reqs, &[2, 3]);

        assert_eq!(d.total_requirements, 5);
        assert_eq!(d.correct_requirements_count, 1);
        assert_eq!(d.orphaned_requirements_count, 2);
        assert_eq!(d.incorrect_requirements_count, 2);
        let potential: Vec<i64> = d.potential_requirements.iter().map(|r| r.id).collect();
        assert_eq!(potential, vec![2, 4]);
        assert_eq!(d.repairable_ids(), vec![2]);
    }

    #[test]
    fn empty_store() {
        let d = diagnose(&project(1, "x"), &[], &[1]);
        assert_eq!(d.total_requirements, 0);
        assert!(d.repairable_ids().is_empty());
    }
}
