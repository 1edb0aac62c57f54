//! Roadmap milestones holding an ordered list of requirement ids.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::status::DEFAULT_MILESTONE_STATUS;
use crate::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: String,
    /// Requirement ids in roadmap order; stored comma-joined.
    pub requirements: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMilestone {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_date")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_id_list")]
    pub requirements: Vec<i64>,
}

impl NewMilestone {
    /// Validate and turn the payload into an unsaved milestone (`id` 0).
    pub fn into_milestone(self, project_id: i64) -> Result<Milestone, ValidationError> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ValidationError::MissingField { field: "title" })?;
        let now = Utc::now();
        Ok(Milestone {
            id: 0,
            project_id,
            title,
            description: self.description,
            deadline: self.deadline,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_MILESTONE_STATUS.to_string()),
            requirements: self.requirements,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update. `deadline: null`, `""` or a malformed date clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilestonePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "de::lenient_double_date")]
    pub deadline: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_opt_id_list")]
    pub requirements: Option<Vec<i64>>,
}

impl MilestonePatch {
    pub fn apply(&self, target: &mut Milestone) -> Result<(), ValidationError> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField { field: "title" });
            }
            target.title = title.clone();
        }
        if let Some(ref description) = self.description {
            target.description = description.clone();
        }
        if let Some(deadline) = self.deadline {
            target.deadline = deadline;
        }
        if let Some(ref status) = self.status {
            target.status = status.clone();
        }
        if let Some(ref ids) = self.requirements {
            target.requirements = ids.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_status_and_ignores_bad_deadline() {
        let payload: NewMilestone = serde_json::from_str(
            r#"{"title": "Beta", "deadline": "soon", "requirements": [3, "4"]}"#,
        )
        .unwrap();
        let m = payload.into_milestone(2).unwrap();
        assert_eq!(m.status, "planned");
        assert_eq!(m.deadline, None);
        assert_eq!(m.requirements, vec![3, 4]);
    }

    #[test]
    fn create_without_title_fails() {
        assert!(NewMilestone::default().into_milestone(1).is_err());
    }

    #[test]
    fn patch_replaces_requirements_and_clears_deadline() {
        let mut m = NewMilestone {
            title: Some("GA".into()),
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30),
            requirements: vec![1, 2],
            ..Default::default()
        }
        .into_milestone(1)
        .unwrap();

        let patch: MilestonePatch =
            serde_json::from_str(r#"{"deadline": "", "requirements": [5]}"#).unwrap();
        patch.apply(&mut m).unwrap();
        assert_eq!(m.deadline, None);
        assert_eq!(m.requirements, vec![5]);
        assert_eq!(m.title, "GA");
    }
}
