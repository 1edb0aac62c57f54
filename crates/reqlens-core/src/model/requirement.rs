//! Requirements captured through the nine-element template, with value
//! estimates and the optional analysis groups (VSM, KANO, SMART, WFMT and
//! free-text research notes).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::status::{DEFAULT_CATEGORY, DEFAULT_PRIORITY, DEFAULT_REQUIREMENT_STATUS};
use crate::constants::{DEFAULT_ESTIMATE, SATISFACTION_RANGE, VALUE_SCORE_RANGE};
use crate::errors::ValidationError;
use crate::valuation::{self, ValueScores};

/// The free-text sections rendered into a requirement description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NineElements {
    #[serde(deserialize_with = "de::string_or_empty")]
    pub scenario: String,
    #[serde(deserialize_with = "de::string_or_empty")]
    pub problem: String,
    #[serde(deserialize_with = "de::string_or_empty")]
    pub current_solution: String,
    #[serde(deserialize_with = "de::string_or_empty")]
    pub goal: String,
    #[serde(deserialize_with = "de::string_or_empty")]
    pub expected_solution: String,
    #[serde(deserialize_with = "de::string_or_empty")]
    pub value: String,
    #[serde(deserialize_with = "de::string_or_empty")]
    pub other_info: String,
}

/// Estimated and actual value scores plus who assessed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAssessment {
    pub estimated_business_value: i64,
    pub estimated_user_value: i64,
    pub estimated_technical_value: i64,
    pub estimated_effort: i64,
    pub estimated_roi: f64,
    pub actual_business_value: i64,
    pub actual_user_value: i64,
    pub actual_technical_value: i64,
    pub actual_effort: i64,
    pub actual_roi: f64,
    pub value_assessor: Option<String>,
    pub value_assessment_date: Option<DateTime<Utc>>,
    pub actual_value_assessor: Option<String>,
    pub actual_value_assessment_date: Option<DateTime<Utc>>,
}

impl ValueAssessment {
    pub fn estimated_scores(&self) -> ValueScores {
        ValueScores {
            business: self.estimated_business_value,
            user: self.estimated_user_value,
            technical: self.estimated_technical_value,
            effort: self.estimated_effort,
        }
    }

    pub fn actual_scores(&self) -> ValueScores {
        ValueScores {
            business: self.actual_business_value,
            user: self.actual_user_value,
            technical: self.actual_technical_value,
            effort: self.actual_effort,
        }
    }

    /// Store estimated scores and the ROI derived from them.
    pub fn set_estimate(&mut self, scores: ValueScores) {
        self.estimated_business_value = scores.business;
        self.estimated_user_value = scores.user;
        self.estimated_technical_value = scores.technical;
        self.estimated_effort = scores.effort;
        self.estimated_roi = valuation::roi(&scores);
    }
}

impl Default for ValueAssessment {
    fn default() -> Self {
        let scores = valuation::estimate_on_create(ValueScores::uniform(DEFAULT_ESTIMATE));
        Self {
            estimated_business_value: scores.business,
            estimated_user_value: scores.user,
            estimated_technical_value: scores.technical,
            estimated_effort: scores.effort,
            estimated_roi: valuation::roi(&scores),
            actual_business_value: 0,
            actual_user_value: 0,
            actual_technical_value: 0,
            actual_effort: 0,
            actual_roi: 0.0,
            value_assessor: None,
            value_assessment_date: None,
            actual_value_assessor: None,
            actual_value_assessment_date: None,
        }
    }
}

/// Value-stream mapping timings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VsmData {
    pub vsm_process_steps: Option<String>,
    pub cycle_time: Option<f64>,
    pub lead_time: Option<f64>,
    pub process_efficiency: Option<f64>,
    pub vsm_current_state: Option<String>,
    pub vsm_future_state: Option<String>,
}

impl VsmData {
    pub fn has_data(&self) -> bool {
        self.vsm_process_steps.is_some()
            || self.cycle_time.is_some()
            || self.lead_time.is_some()
            || self.process_efficiency.is_some()
            || self.vsm_current_state.is_some()
            || self.vsm_future_state.is_some()
    }
}

/// KANO classification and survey answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanoData {
    pub kano_category: Option<String>,
    pub kano_survey_data: Option<String>,
    pub kano_priority_score: Option<f64>,
    pub kano_positive_answer: Option<String>,
    pub kano_negative_answer: Option<String>,
}

/// SMART goal breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartData {
    pub smart_specific: Option<String>,
    pub smart_measurable: Option<String>,
    pub smart_achievable: Option<bool>,
    pub smart_relevant: Option<String>,
    #[serde(deserialize_with = "de::lenient_date")]
    pub smart_timebound: Option<NaiveDate>,
    /// `basic`, `challenge` or `ideal`.
    pub smart_target_level: Option<String>,
}

/// Work-factor / methods-time measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WfmtData {
    pub wfmt_analysis: Option<String>,
    pub standard_time: Option<f64>,
    pub improvement_potential: Option<f64>,
    pub wfmt_tmu_total: Option<f64>,
    pub wfmt_allowance_rate: Option<f64>,
}

impl WfmtData {
    pub fn has_data(&self) -> bool {
        self.wfmt_analysis.is_some()
            || self.standard_time.is_some()
            || self.improvement_potential.is_some()
            || self.wfmt_tmu_total.is_some()
            || self.wfmt_allowance_rate.is_some()
    }
}

/// Research notes: users, competitors, market, current state, planning,
/// risk and cost/benefit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightData {
    pub user_research_data: Option<String>,
    pub user_feedback: Option<String>,
    #[serde(deserialize_with = "de::lenient_opt_i64")]
    pub user_satisfaction: Option<i64>,
    pub target_user_group: Option<String>,

    pub competitor_analysis: Option<String>,
    pub competitor_products: Option<String>,
    pub competitive_advantage: Option<String>,

    pub market_research: Option<String>,
    pub market_size: Option<String>,
    pub market_trends: Option<String>,

    pub current_state_analysis: Option<String>,
    pub product_lifecycle_stage: Option<String>,
    pub technical_constraints: Option<String>,
    pub resource_constraints: Option<String>,

    pub short_term_plan: Option<String>,
    pub medium_term_plan: Option<String>,
    pub long_term_plan: Option<String>,
    pub strategic_alignment: Option<String>,

    pub risk_assessment: Option<String>,
    pub technical_risks: Option<String>,
    pub business_risks: Option<String>,
    pub implementation_risks: Option<String>,

    #[serde(deserialize_with = "de::lenient_opt_i64")]
    pub development_cost_estimate: Option<i64>,
    #[serde(deserialize_with = "de::lenient_opt_i64")]
    pub operational_cost_estimate: Option<i64>,
    #[serde(deserialize_with = "de::lenient_opt_i64")]
    pub expected_revenue: Option<i64>,
    pub cost_benefit_analysis: Option<String>,

    pub implementation_priority: Option<String>,
    pub dependencies: Option<String>,
    pub alternative_solutions: Option<String>,
    pub success_metrics: Option<String>,
}

/// All optional analysis groups of a requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementAnalysis {
    #[serde(flatten)]
    pub vsm: VsmData,
    #[serde(flatten)]
    pub kano: KanoData,
    #[serde(flatten)]
    pub smart: SmartData,
    #[serde(flatten)]
    pub wfmt: WfmtData,
    #[serde(flatten)]
    pub insight: InsightData,
}

impl RequirementAnalysis {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(value) = self.insight.user_satisfaction {
            let (min, max) = SATISFACTION_RANGE;
            if !(min..=max).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field: "user_satisfaction",
                    min,
                    max,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirement {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub requirement_type: String,
    #[serde(flatten)]
    pub elements: NineElements,
    pub priority_level: String,
    pub source: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub acceptance_criteria: String,
    #[serde(flatten)]
    pub assessment: ValueAssessment,
    pub expected_completion_date: Option<NaiveDate>,
    pub assigned_milestone_id: Option<i64>,
    #[serde(flatten)]
    pub analysis: RequirementAnalysis,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Requirement {
    /// A fresh requirement with every default applied. `id` is 0 until stored.
    pub fn new(project_id: i64, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            project_id,
            title: title.into(),
            requirement_type: String::new(),
            elements: NineElements::default(),
            priority_level: DEFAULT_PRIORITY.to_string(),
            source: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            status: DEFAULT_REQUIREMENT_STATUS.to_string(),
            acceptance_criteria: String::new(),
            assessment: ValueAssessment::default(),
            expected_completion_date: None,
            assigned_milestone_id: None,
            analysis: RequirementAnalysis::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Short description: the non-empty scenario, problem, goal and current
    /// solution joined by single spaces.
    pub fn summary(&self) -> String {
        let e = &self.elements;
        [&e.scenario, &e.problem, &e.goal, &e.current_solution]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn default_estimate() -> i64 {
    DEFAULT_ESTIMATE
}

/// Payload for creating a requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRequirement {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub requirement_type: Option<String>,
    #[serde(flatten)]
    pub elements: NineElements,
    #[serde(default)]
    pub priority_level: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub acceptance_criteria: Option<String>,
    #[serde(default = "default_estimate", deserialize_with = "de::lenient_i64")]
    pub estimated_business_value: i64,
    #[serde(default = "default_estimate", deserialize_with = "de::lenient_i64")]
    pub estimated_user_value: i64,
    #[serde(default = "default_estimate", deserialize_with = "de::lenient_i64")]
    pub estimated_technical_value: i64,
    #[serde(default = "default_estimate", deserialize_with = "de::lenient_i64")]
    pub estimated_effort: i64,
    #[serde(default)]
    pub value_assessor: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_date")]
    pub expected_completion_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub analysis: RequirementAnalysis,
}

impl NewRequirement {
    /// Validate and turn the payload into an unsaved requirement.
    pub fn into_requirement(self, project_id: i64) -> Result<Requirement, ValidationError> {
        self.analysis.validate()?;
        let requested = ValueScores {
            business: self.estimated_business_value,
            user: self.estimated_user_value,
            technical: self.estimated_technical_value,
            effort: self.estimated_effort,
        };
        requested.validate(valuation::ESTIMATE_FIELDS)?;
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ValidationError::MissingField { field: "title" })?;

        let mut req = Requirement::new(project_id, title);
        if let Some(v) = self.requirement_type {
            req.requirement_type = v;
        }
        req.elements = self.elements;
        if let Some(v) = self.priority_level {
            req.priority_level = v;
        }
        if let Some(v) = self.source {
            req.source = v;
        }
        if let Some(v) = self.category {
            req.category = v;
        }
        if let Some(v) = self.priority {
            req.priority = v;
        }
        if let Some(v) = self.status {
            req.status = v;
        }
        if let Some(v) = self.acceptance_criteria {
            req.acceptance_criteria = v;
        }

        req.assessment.set_estimate(valuation::estimate_on_create(requested));
        if let Some(assessor) = self.value_assessor.filter(|a| !a.is_empty()) {
            req.assessment.value_assessor = Some(assessor);
            req.assessment.value_assessment_date = Some(req.created_at);
        }

        req.expected_completion_date = self.expected_completion_date;
        req.analysis = self.analysis;
        Ok(req)
    }
}

/// Partial update of a requirement. A present key overwrites the stored
/// value. Any key of the analysis groups may be included too; `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequirementPatch {
    pub title: Option<String>,
    pub requirement_type: Option<String>,
    pub scenario: Option<String>,
    pub problem: Option<String>,
    pub current_solution: Option<String>,
    pub goal: Option<String>,
    pub expected_solution: Option<String>,
    pub value: Option<String>,
    pub priority_level: Option<String>,
    pub other_info: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub acceptance_criteria: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_double_date")]
    pub expected_completion_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "de::lenient_opt_i64")]
    pub estimated_business_value: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_opt_i64")]
    pub estimated_user_value: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_opt_i64")]
    pub estimated_technical_value: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_opt_i64")]
    pub estimated_effort: Option<i64>,
    #[serde(default, deserialize_with = "de::double_option")]
    pub value_assessor: Option<Option<String>>,
    /// Remaining keys; only names of analysis fields are applied.
    #[serde(flatten)]
    pub analysis: serde_json::Map<String, serde_json::Value>,
}

impl RequirementPatch {
    fn touches_estimate(&self) -> bool {
        self.estimated_business_value.is_some()
            || self.estimated_user_value.is_some()
            || self.estimated_technical_value.is_some()
            || self.estimated_effort.is_some()
    }

    /// Checks that need no stored row: a present title must not be blank and
    /// present scores must be in range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField { field: "title" });
            }
        }
        let present = [
            self.estimated_business_value,
            self.estimated_user_value,
            self.estimated_technical_value,
            self.estimated_effort,
        ];
        let (min, max) = VALUE_SCORE_RANGE;
        for (field, value) in valuation::ESTIMATE_FIELDS.into_iter().zip(present) {
            match value {
                Some(value) if !(min..=max).contains(&value) => {
                    return Err(ValidationError::OutOfRange {
                        field,
                        min,
                        max,
                        value,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply the patch in place. Nothing is modified when validation fails.
    pub fn apply(&self, target: &mut Requirement) -> Result<(), ValidationError> {
        self.validate()?;
        let analysis = self.merged_analysis(&target.analysis)?;

        let text_fields = [
            (&self.title, &mut target.title),
            (&self.requirement_type, &mut target.requirement_type),
            (&self.scenario, &mut target.elements.scenario),
            (&self.problem, &mut target.elements.problem),
            (&self.current_solution, &mut target.elements.current_solution),
            (&self.goal, &mut target.elements.goal),
            (&self.expected_solution, &mut target.elements.expected_solution),
            (&self.value, &mut target.elements.value),
            (&self.priority_level, &mut target.priority_level),
            (&self.other_info, &mut target.elements.other_info),
            (&self.source, &mut target.source),
            (&self.category, &mut target.category),
            (&self.priority, &mut target.priority),
            (&self.status, &mut target.status),
            (&self.acceptance_criteria, &mut target.acceptance_criteria),
        ];
        for (patch, slot) in text_fields {
            if let Some(v) = patch {
                *slot = v.clone();
            }
        }

        if let Some(date) = self.expected_completion_date {
            target.expected_completion_date = date;
        }

        if self.touches_estimate() {
            let current = target.assessment.estimated_scores();
            target.assessment.set_estimate(ValueScores {
                business: self.estimated_business_value.unwrap_or(current.business),
                user: self.estimated_user_value.unwrap_or(current.user),
                technical: self.estimated_technical_value.unwrap_or(current.technical),
                effort: self.estimated_effort.unwrap_or(current.effort),
            });
        }
        if let Some(ref assessor) = self.value_assessor {
            target.assessment.value_assessor = assessor.clone();
        }

        if let Some(analysis) = analysis {
            target.analysis = analysis;
        }
        Ok(())
    }

    /// Overlay the analysis keys present in the patch on `current`.
    /// `None` when the patch carries no analysis keys.
    fn merged_analysis(
        &self,
        current: &RequirementAnalysis,
    ) -> Result<Option<RequirementAnalysis>, ValidationError> {
        if self.analysis.is_empty() {
            return Ok(None);
        }
        let invalid = |e: serde_json::Error| ValidationError::InvalidValue {
            field: "analysis",
            message: e.to_string(),
        };

        let mut merged = match serde_json::to_value(current).map_err(invalid)? {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        let mut touched = false;
        for (key, value) in &self.analysis {
            if merged.contains_key(key) {
                merged.insert(key.clone(), value.clone());
                touched = true;
            }
        }
        if !touched {
            return Ok(None);
        }
        let analysis: RequirementAnalysis =
            serde_json::from_value(serde_json::Value::Object(merged)).map_err(invalid)?;
        analysis.validate()?;
        Ok(Some(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults() {
        let r = Requirement::new(7, "Export to CSV");
        assert_eq!(r.project_id, 7);
        assert_eq!(r.status, "collected");
        assert_eq!(r.priority, "medium");
        assert_eq!(r.priority_level, "medium");
        assert_eq!(r.category, "functional");
        assert_eq!(r.assessment.estimated_effort, 5);
        assert_eq!(r.assessment.estimated_roi, 3.0);
        assert_eq!(r.assessment.actual_roi, 0.0);
    }

    #[test]
    fn summary_joins_in_fixed_order() {
        let mut r = Requirement::new(1, "t");
        r.elements.goal = "G".into();
        r.elements.scenario = "S".into();
        r.elements.current_solution = "C".into();
        r.elements.expected_solution = "ignored".into();
        assert_eq!(r.summary(), "S G C");
        assert_eq!(Requirement::new(1, "t").summary(), "");
    }

    #[test]
    fn create_requires_title() {
        let payload: NewRequirement = serde_json::from_str(r#"{"scenario": "x"}"#).unwrap();
        assert_eq!(
            payload.into_requirement(1).unwrap_err(),
            ValidationError::MissingField { field: "title" }
        );
    }

    #[test]
    fn create_clamps_effort_and_reads_string_scores() {
        let payload: NewRequirement = serde_json::from_str(
            r#"{"title": "Search", "estimated_business_value": "8",
                "estimated_user_value": 6, "estimated_technical_value": 4,
                "estimated_effort": 0, "expected_completion_date": "not a date",
                "kano_category": "attractive", "cycle_time": 2.5}"#,
        )
        .unwrap();
        let r = payload.into_requirement(3).unwrap();
        assert_eq!(r.assessment.estimated_effort, 1);
        assert_eq!(r.assessment.estimated_roi, 18.0);
        assert_eq!(r.expected_completion_date, None);
        assert_eq!(r.analysis.kano.kano_category.as_deref(), Some("attractive"));
        assert_eq!(r.analysis.vsm.cycle_time, Some(2.5));
    }

    #[test]
    fn patch_recomputes_roi_only_when_estimates_present() {
        let mut r = Requirement::new(1, "t");
        r.assessment.estimated_roi = 99.0;

        let untouched: RequirementPatch =
            serde_json::from_str(r#"{"status": "confirmed"}"#).unwrap();
        untouched.apply(&mut r).unwrap();
        assert_eq!(r.status, "confirmed");
        assert_eq!(r.assessment.estimated_roi, 99.0);

        let touched: RequirementPatch =
            serde_json::from_str(r#"{"estimated_effort": "3"}"#).unwrap();
        touched.apply(&mut r).unwrap();
        assert_eq!(r.assessment.estimated_effort, 3);
        assert_eq!(r.assessment.estimated_roi, 5.0);
    }

    #[test]
    fn patch_with_zero_effort_yields_zero_roi() {
        let mut r = Requirement::new(1, "t");
        let patch: RequirementPatch = serde_json::from_str(r#"{"estimated_effort": 0}"#).unwrap();
        patch.apply(&mut r).unwrap();
        assert_eq!(r.assessment.estimated_effort, 0);
        assert_eq!(r.assessment.estimated_roi, 0.0);
    }

    #[test]
    fn patch_dates_clear_on_null_empty_or_malformed() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1);
        for body in [
            r#"{"expected_completion_date": null}"#,
            r#"{"expected_completion_date": ""}"#,
            r#"{"expected_completion_date": "2025/03/01"}"#,
        ] {
            let mut r = Requirement::new(1, "t");
            r.expected_completion_date = date;
            let patch: RequirementPatch = serde_json::from_str(body).unwrap();
            patch.apply(&mut r).unwrap();
            assert_eq!(r.expected_completion_date, None, "body: {body}");
        }

        let mut r = Requirement::new(1, "t");
        r.expected_completion_date = date;
        let patch: RequirementPatch = serde_json::from_str(r#"{"title": "renamed"}"#).unwrap();
        patch.apply(&mut r).unwrap();
        assert_eq!(r.expected_completion_date, date);
    }

    #[test]
    fn patch_sets_and_clears_analysis_fields() {
        let mut r = Requirement::new(1, "t");
        r.analysis.wfmt.standard_time = Some(12.0);

        let patch: RequirementPatch = serde_json::from_str(
            r#"{"smart_achievable": true, "standard_time": null, "unrelated": 1}"#,
        )
        .unwrap();
        patch.apply(&mut r).unwrap();
        assert_eq!(r.analysis.smart.smart_achievable, Some(true));
        assert_eq!(r.analysis.wfmt.standard_time, None);
    }

    #[test]
    fn patch_with_bad_analysis_type_is_rejected() {
        let mut r = Requirement::new(1, "t");
        let patch: RequirementPatch =
            serde_json::from_str(r#"{"title": "new", "cycle_time": "fast"}"#).unwrap();
        assert!(patch.apply(&mut r).is_err());
        assert_eq!(r.title, "t");
    }

    #[test]
    fn create_rejects_scores_outside_range() {
        let body = format!(r#"{{"title": "t", "estimated_user_value": {}}}"#, i64::MAX);
        let payload: NewRequirement = serde_json::from_str(&body).unwrap();
        assert!(matches!(
            payload.into_requirement(1),
            Err(ValidationError::OutOfRange { field: "estimated_user_value", .. })
        ));
    }

    #[test]
    fn patch_with_huge_score_leaves_target_untouched() {
        let mut r = Requirement::new(1, "t");
        let body = format!(
            r#"{{"status": "confirmed", "estimated_business_value": {}}}"#,
            i64::MAX
        );
        let patch: RequirementPatch = serde_json::from_str(&body).unwrap();
        assert!(matches!(
            patch.validate(),
            Err(ValidationError::OutOfRange { field: "estimated_business_value", .. })
        ));
        assert!(patch.apply(&mut r).is_err());
        assert_eq!(r.status, "collected");
        assert_eq!(r.assessment.estimated_business_value, 5);
    }

    #[test]
    fn satisfaction_outside_one_to_ten_is_rejected() {
        let payload: NewRequirement =
            serde_json::from_str(r#"{"title": "t", "user_satisfaction": "11"}"#).unwrap();
        assert!(matches!(
            payload.into_requirement(1),
            Err(ValidationError::OutOfRange { field: "user_satisfaction", .. })
        ));
    }

    #[test]
    fn serialized_requirement_is_flat() {
        let r = Requirement::new(1, "t");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "collected");
        assert_eq!(json["estimated_roi"], 3.0);
        assert!(json["kano_category"].is_null());
        assert_eq!(json["scenario"], "");
    }
}
