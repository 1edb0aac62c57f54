//! Project stakeholders with influence/interest scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use crate::constants::{DEFAULT_STAKEHOLDER_SCORE, STAKEHOLDER_SCORE_RANGE};
use crate::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub influence: i64,
    pub interest: i64,
    /// Free-text notes on which requirements this stakeholder cares about.
    pub requirements: Option<String>,
    pub contact_info: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_score() -> i64 {
    DEFAULT_STAKEHOLDER_SCORE
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStakeholder {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_score", deserialize_with = "de::lenient_i64")]
    pub influence: i64,
    #[serde(default = "default_score", deserialize_with = "de::lenient_i64")]
    pub interest: i64,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewStakeholder {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        check_score("influence", self.influence)?;
        check_score("interest", self.interest)
    }

    /// Validate and turn the payload into an unsaved stakeholder (`id` 0).
    pub fn into_stakeholder(self, project_id: i64) -> Result<Stakeholder, ValidationError> {
        self.validate()?;
        let now = Utc::now();
        Ok(Stakeholder {
            id: 0,
            project_id,
            name: self.name.trim().to_string(),
            role: self.role,
            influence: self.influence,
            interest: self.interest,
            requirements: self.requirements,
            contact_info: self.contact_info,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update. A present key overwrites; `null` clears optional text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StakeholderPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "de::lenient_opt_i64")]
    pub influence: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_opt_i64")]
    pub interest: Option<i64>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub requirements: Option<Option<String>>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub contact_info: Option<Option<String>>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub notes: Option<Option<String>>,
}

impl StakeholderPatch {
    /// Apply the patch in place. Nothing is modified when validation fails.
    pub fn apply(&self, target: &mut Stakeholder) -> Result<(), ValidationError> {
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField { field: "name" });
            }
        }
        if let Some(v) = self.influence {
            check_score("influence", v)?;
        }
        if let Some(v) = self.interest {
            check_score("interest", v)?;
        }

        if let Some(ref name) = self.name {
            target.name = name.trim().to_string();
        }
        if let Some(ref role) = self.role {
            target.role = role.clone();
        }
        if let Some(v) = self.influence {
            target.influence = v;
        }
        if let Some(v) = self.interest {
            target.interest = v;
        }
        if let Some(ref v) = self.requirements {
            target.requirements = v.clone();
        }
        if let Some(ref v) = self.contact_info {
            target.contact_info = v.clone();
        }
        if let Some(ref v) = self.notes {
            target.notes = v.clone();
        }
        Ok(())
    }
}

fn check_score(field: &'static str, value: i64) -> Result<(), ValidationError> {
    let (min, max) = STAKEHOLDER_SCORE_RANGE;
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stakeholder {
        let now = Utc::now();
        Stakeholder {
            id: 1,
            project_id: 1,
            name: "Ops lead".into(),
            role: Some("operations".into()),
            influence: 4,
            interest: 2,
            requirements: None,
            contact_info: Some("ops@example.com".into()),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn new_stakeholder_defaults_scores() {
        let s: NewStakeholder = serde_json::from_str(r#"{"name": "Finance"}"#).unwrap();
        assert_eq!((s.influence, s.interest), (3, 3));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn influence_out_of_range_is_rejected() {
        let s: NewStakeholder =
            serde_json::from_str(r#"{"name": "Finance", "influence": "9"}"#).unwrap();
        assert!(matches!(
            s.validate(),
            Err(ValidationError::OutOfRange { field: "influence", value: 9, .. })
        ));
    }

    #[test]
    fn patch_overwrites_present_keys_and_clears_nulls() {
        let mut s = sample();
        let patch: StakeholderPatch =
            serde_json::from_str(r#"{"interest": 5, "role": null}"#).unwrap();
        patch.apply(&mut s).unwrap();
        assert_eq!(s.interest, 5);
        assert_eq!(s.influence, 4);
        assert_eq!(s.role, None);
        assert_eq!(s.contact_info.as_deref(), Some("ops@example.com"));
    }

    #[test]
    fn invalid_patch_leaves_target_untouched() {
        let mut s = sample();
        let patch: StakeholderPatch =
            serde_json::from_str(r#"{"name": "New", "interest": 0}"#).unwrap();
        assert!(patch.apply(&mut s).is_err());
        assert_eq!(s.name, "Ops lead");
    }

    #[test]
    fn name_is_trimmed_on_create_and_patch() {
        let new: NewStakeholder = serde_json::from_str(r#"{"name": "  Finance  "}"#).unwrap();
        assert_eq!(new.into_stakeholder(1).unwrap().name, "Finance");

        let mut s = sample();
        let patch: StakeholderPatch = serde_json::from_str(r#"{"name": " Ops manager "}"#).unwrap();
        patch.apply(&mut s).unwrap();
        assert_eq!(s.name, "Ops manager");
    }
}
