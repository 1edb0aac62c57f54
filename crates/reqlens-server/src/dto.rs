//! Request bodies that have no domain counterpart, and response views.

use chrono::{DateTime, NaiveDate, Utc};
use reqlens_core::model::de;
use reqlens_core::model::{NineElements, Requirement, ValueAssessment};
use reqlens_core::template::render_description;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub creator: Option<String>,
}

/// Body of `POST /api/requirement/{rid}/update`.
#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// Body of `POST /api/requirement/{rid}/assign`. A missing or null
/// `milestone_id` clears the assignment.
#[derive(Debug, Default, Deserialize)]
pub struct MilestoneAssignment {
    #[serde(default, deserialize_with = "de::lenient_opt_i64")]
    pub milestone_id: Option<i64>,
}

/// Body of `PUT /api/milestone/{mid}/requirements`.
#[derive(Debug, Default, Deserialize)]
pub struct RequirementIds {
    #[serde(default, deserialize_with = "de::lenient_id_list")]
    pub requirement_ids: Vec<i64>,
}

/// Requirement as listed per project, with the rendered description.
#[derive(Debug, Serialize)]
pub struct RequirementListItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub category: String,
    pub requirement_type: String,
    pub source: String,
    pub estimated_roi: f64,
    pub actual_roi: f64,
    pub kano_category: Option<String>,
    pub assigned_milestone_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Requirement> for RequirementListItem {
    fn from(r: &Requirement) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            description: render_description(&r.elements),
            priority: r.priority.clone(),
            status: r.status.clone(),
            category: r.category.clone(),
            requirement_type: r.requirement_type.clone(),
            source: r.source.clone(),
            estimated_roi: r.assessment.estimated_roi,
            actual_roi: r.assessment.actual_roi,
            kano_category: r.analysis.kano.kano_category.clone(),
            assigned_milestone_id: r.assigned_milestone_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Single requirement without the analysis groups.
#[derive(Debug, Serialize)]
pub struct RequirementView<'a> {
    pub id: i64,
    pub project_id: i64,
    pub title: &'a str,
    pub requirement_type: &'a str,
    pub description: String,
    #[serde(flatten)]
    pub elements: &'a NineElements,
    pub priority_level: &'a str,
    pub source: &'a str,
    pub category: &'a str,
    pub priority: &'a str,
    pub status: &'a str,
    pub acceptance_criteria: &'a str,
    #[serde(flatten)]
    pub assessment: &'a ValueAssessment,
    pub expected_completion_date: Option<NaiveDate>,
    pub assigned_milestone_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Requirement> for RequirementView<'a> {
    fn from(r: &'a Requirement) -> Self {
        Self {
            id: r.id,
            project_id: r.project_id,
            title: &r.title,
            requirement_type: &r.requirement_type,
            description: render_description(&r.elements),
            elements: &r.elements,
            priority_level: &r.priority_level,
            source: &r.source,
            category: &r.category,
            priority: &r.priority,
            status: &r.status,
            acceptance_criteria: &r.acceptance_criteria,
            assessment: &r.assessment,
            expected_completion_date: r.expected_completion_date,
            assigned_milestone_id: r.assigned_milestone_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Every stored field plus the rendered description.
#[derive(Debug, Serialize)]
pub struct RequirementDetail<'a> {
    #[serde(flatten)]
    pub requirement: &'a Requirement,
    pub description: String,
}

impl<'a> From<&'a Requirement> for RequirementDetail<'a> {
    fn from(r: &'a Requirement) -> Self {
        Self {
            requirement: r,
            description: render_description(&r.elements),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_accepts_null_string_and_missing() {
        let cleared: MilestoneAssignment =
            serde_json::from_str(r#"{"milestone_id": null}"#).unwrap();
        assert_eq!(cleared.milestone_id, None);
        let missing: MilestoneAssignment = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.milestone_id, None);
        let set: MilestoneAssignment = serde_json::from_str(r#"{"milestone_id": "4"}"#).unwrap();
        assert_eq!(set.milestone_id, Some(4));
    }

    #[test]
    fn list_item_renders_description() {
        let mut r = Requirement::new(1, "t");
        r.elements.goal = "ship".into();
        let item = RequirementListItem::from(&r);
        assert_eq!(item.description, "【目标】\nship\n\n");
    }

    #[test]
    fn view_omits_analysis_fields() {
        let r = Requirement::new(1, "t");
        let json = serde_json::to_value(RequirementView::from(&r)).unwrap();
        assert_eq!(json["estimated_roi"], 3.0);
        assert!(json.get("kano_category").is_none());
        let full = serde_json::to_value(RequirementDetail::from(&r)).unwrap();
        assert!(full.get("kano_category").is_some());
    }
}
