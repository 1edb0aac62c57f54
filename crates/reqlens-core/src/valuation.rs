//! Return-on-investment arithmetic and estimate-versus-actual tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{IMPROVING_TREND_THRESHOLD, MIN_CREATE_EFFORT, VALUE_SCORE_RANGE};
use crate::errors::ValidationError;
use crate::model::de;
use crate::model::status::COMPLETED;
use crate::model::{Project, Requirement};

/// Three value dimensions and the effort they cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueScores {
    pub business: i64,
    pub user: i64,
    pub technical: i64,
    pub effort: i64,
}

impl ValueScores {
    pub fn uniform(score: i64) -> Self {
        Self {
            business: score,
            user: score,
            technical: score,
            effort: score,
        }
    }

    pub fn total(&self) -> i64 {
        self.business.saturating_add(self.user).saturating_add(self.technical)
    }

    /// Reject any score outside `VALUE_SCORE_RANGE`. `fields` names the
    /// business, user, technical and effort inputs, in that order.
    pub fn validate(&self, fields: [&'static str; 4]) -> Result<(), ValidationError> {
        let (min, max) = VALUE_SCORE_RANGE;
        let values = [self.business, self.user, self.technical, self.effort];
        for (field, value) in fields.into_iter().zip(values) {
            if !(min..=max).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    min,
                    max,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Payload names of the estimated scores.
pub const ESTIMATE_FIELDS: [&str; 4] = [
    "estimated_business_value",
    "estimated_user_value",
    "estimated_technical_value",
    "estimated_effort",
];

/// Payload names of the actual scores.
pub const ACTUAL_FIELDS: [&str; 4] = [
    "actual_business_value",
    "actual_user_value",
    "actual_technical_value",
    "actual_effort",
];

/// `total / effort`, or 0 when effort is not positive.
pub fn roi(scores: &ValueScores) -> f64 {
    if scores.effort > 0 {
        scores.total() as f64 / scores.effort as f64
    } else {
        0.0
    }
}

/// Scores as stored for a new requirement: non-positive effort becomes 1.
pub fn estimate_on_create(mut scores: ValueScores) -> ValueScores {
    if scores.effort <= 0 {
        scores.effort = MIN_CREATE_EFFORT;
    }
    scores
}

/// How close an estimate came to the actual ROI, in percent.
/// 100 is exact; the value goes negative when the miss exceeds the actual.
pub fn accuracy(estimated_roi: f64, actual_roi: f64) -> f64 {
    if actual_roi > 0.0 {
        (1.0 - (actual_roi - estimated_roi).abs() / actual_roi) * 100.0
    } else {
        0.0
    }
}

/// Payload recording the value a requirement actually delivered.
#[derive(Debug, Clone, Deserialize)]
pub struct ActualAssessment {
    #[serde(deserialize_with = "de::lenient_i64")]
    pub actual_business_value: i64,
    #[serde(deserialize_with = "de::lenient_i64")]
    pub actual_user_value: i64,
    #[serde(deserialize_with = "de::lenient_i64")]
    pub actual_technical_value: i64,
    #[serde(deserialize_with = "de::lenient_i64")]
    pub actual_effort: i64,
    #[serde(default)]
    pub actual_value_assessor: Option<String>,
}

impl ActualAssessment {
    pub fn scores(&self) -> ValueScores {
        ValueScores {
            business: self.actual_business_value,
            user: self.actual_user_value,
            technical: self.actual_technical_value,
            effort: self.actual_effort,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scores().validate(ACTUAL_FIELDS)
    }

    /// Store the actual scores, assessor, timestamp and derived ROI.
    pub fn apply(&self, target: &mut Requirement, now: DateTime<Utc>) {
        let scores = self.scores();
        let a = &mut target.assessment;
        a.actual_business_value = scores.business;
        a.actual_user_value = scores.user;
        a.actual_technical_value = scores.technical;
        a.actual_effort = scores.effort;
        a.actual_roi = roi(&scores);
        a.actual_value_assessor = self.actual_value_assessor.clone();
        a.actual_value_assessment_date = Some(now);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
}

/// One requirement's estimate next to its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessedRequirement {
    pub id: i64,
    pub title: String,
    pub estimated_roi: f64,
    pub actual_roi: f64,
    pub accuracy: f64,
    pub value_assessor: String,
}

impl AssessedRequirement {
    fn from_requirement(r: &Requirement) -> Self {
        let a = &r.assessment;
        Self {
            id: r.id,
            title: r.title.clone(),
            estimated_roi: a.estimated_roi,
            actual_roi: a.actual_roi,
            accuracy: accuracy(a.estimated_roi, a.actual_roi),
            value_assessor: a.value_assessor.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAssessmentSummary {
    pub total_requirements: usize,
    pub completed_requirements: Vec<AssessedRequirement>,
    /// Mean accuracy of completed requirements as a fraction (0.85 = 85%).
    pub average_accuracy: f64,
    /// Estimator with the best mean accuracy.
    pub best_performer: Option<String>,
    pub trend: Trend,
}

/// Summarize how well a project's estimates held up.
///
/// Only requirements with status `completed` and a positive actual ROI count.
pub fn summarize(requirements: &[Requirement]) -> ValueAssessmentSummary {
    let completed: Vec<AssessedRequirement> = requirements
        .iter()
        .filter(|r| r.status == COMPLETED && r.assessment.actual_roi > 0.0)
        .map(AssessedRequirement::from_requirement)
        .collect();

    let average_accuracy = if completed.is_empty() {
        0.0
    } else {
        completed.iter().map(|c| c.accuracy).sum::<f64>() / completed.len() as f64 / 100.0
    };

    // (assessor, sum, count) in first-seen order so ties go to the earliest.
    let mut per_assessor: Vec<(&str, f64, usize)> = Vec::new();
    for c in completed.iter().filter(|c| !c.value_assessor.is_empty()) {
        match per_assessor.iter_mut().find(|(name, _, _)| *name == c.value_assessor) {
            Some(entry) => {
                entry.1 += c.accuracy;
                entry.2 += 1;
            }
            None => per_assessor.push((c.value_assessor.as_str(), c.accuracy, 1)),
        }
    }
    let mut best: Option<(&str, f64)> = None;
    for &(name, sum, count) in &per_assessor {
        let mean = sum / count as f64;
        if best.map_or(true, |(_, top)| mean > top) {
            best = Some((name, mean));
        }
    }
    let best_performer = best.map(|(name, _)| name.to_string());

    let trend = if completed.len() > IMPROVING_TREND_THRESHOLD {
        Trend::Improving
    } else {
        Trend::Stable
    };

    ValueAssessmentSummary {
        total_requirements: requirements.len(),
        completed_requirements: completed,
        average_accuracy,
        best_performer,
        trend,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueReportEntry {
    pub title: String,
    pub estimated_roi: f64,
    pub actual_roi: f64,
    pub accuracy: f64,
    pub value_assessor: String,
}

/// Exportable value report covering every requirement of a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueReport {
    pub project_name: String,
    pub export_date: DateTime<Utc>,
    pub requirements: Vec<ValueReportEntry>,
}

pub fn build_report(
    project: &Project,
    requirements: &[Requirement],
    now: DateTime<Utc>,
) -> ValueReport {
    ValueReport {
        project_name: project.name.clone(),
        export_date: now,
        requirements: requirements
            .iter()
            .map(|r| {
                let a = AssessedRequirement::from_requirement(r);
                ValueReportEntry {
                    title: a.title,
                    estimated_roi: a.estimated_roi,
                    actual_roi: a.actual_roi,
                    accuracy: a.accuracy,
                    value_assessor: a.value_assessor,
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(id: i64, estimated: f64, actual: f64, assessor: Option<&str>) -> Requirement {
        let mut r = Requirement::new(1, format!("r{id}"));
        r.id = id;
        r.status = COMPLETED.into();
        r.assessment.estimated_roi = estimated;
        r.assessment.actual_roi = actual;
        r.assessment.value_assessor = assessor.map(str::to_string);
        r
    }

    #[test]
    fn roi_is_total_over_effort() {
        let s = ValueScores {
            business: 8,
            user: 6,
            technical: 4,
            effort: 3,
        };
        assert_eq!(s.total(), 18);
        assert_eq!(roi(&s), 6.0);
        assert_eq!(roi(&ValueScores { effort: 0, ..s }), 0.0);
        assert_eq!(roi(&ValueScores { effort: -2, ..s }), 0.0);
    }

    #[test]
    fn create_clamps_non_positive_effort() {
        let s = estimate_on_create(ValueScores {
            business: 1,
            user: 1,
            technical: 1,
            effort: -4,
        });
        assert_eq!(s.effort, 1);
        assert_eq!(estimate_on_create(ValueScores::uniform(5)).effort, 5);
    }

    #[test]
    fn accuracy_matches_relative_error() {
        assert_eq!(accuracy(4.0, 4.0), 100.0);
        assert_eq!(accuracy(3.0, 4.0), 75.0);
        assert_eq!(accuracy(5.0, 4.0), 75.0);
        assert_eq!(accuracy(3.0, 0.0), 0.0);
    }

    #[test]
    fn actual_assessment_sets_roi_and_timestamp() {
        let mut r = Requirement::new(1, "t");
        let now = Utc::now();
        let payload: ActualAssessment = serde_json::from_str(
            r#"{"actual_business_value": "6", "actual_user_value": 6,
                "actual_technical_value": 6, "actual_effort": 4,
                "actual_value_assessor": "lin"}"#,
        )
        .unwrap();
        payload.apply(&mut r, now);
        assert_eq!(r.assessment.actual_roi, 4.5);
        assert_eq!(r.assessment.actual_value_assessor.as_deref(), Some("lin"));
        assert_eq!(r.assessment.actual_value_assessment_date, Some(now));
    }

    #[test]
    fn actual_assessment_requires_all_scores() {
        assert!(serde_json::from_str::<ActualAssessment>(r#"{"actual_effort": 2}"#).is_err());
    }

    #[test]
    fn oversized_scores_are_rejected() {
        let payload: ActualAssessment = serde_json::from_value(serde_json::json!({
            "actual_business_value": i64::MAX,
            "actual_user_value": 1,
            "actual_technical_value": 1,
            "actual_effort": 1,
        }))
        .unwrap();
        assert!(matches!(
            payload.validate(),
            Err(ValidationError::OutOfRange { field: "actual_business_value", .. })
        ));

        let edge = ValueScores::uniform(VALUE_SCORE_RANGE.1);
        assert!(edge.validate(ESTIMATE_FIELDS).is_ok());
        let low = ValueScores {
            effort: VALUE_SCORE_RANGE.0 - 1,
            ..edge
        };
        assert!(matches!(
            low.validate(ESTIMATE_FIELDS),
            Err(ValidationError::OutOfRange { field: "estimated_effort", .. })
        ));
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let s = ValueScores {
            business: i64::MAX,
            user: i64::MAX,
            technical: 1,
            effort: 1,
        };
        assert_eq!(s.total(), i64::MAX);
    }

    #[test]
    fn summary_of_empty_project() {
        let s = summarize(&[]);
        assert_eq!(s.average_accuracy, 0.0);
        assert_eq!(s.best_performer, None);
        assert_eq!(s.trend, Trend::Stable);
    }

    #[test]
    fn summary_ignores_incomplete_and_unassessed() {
        let mut in_progress = completed(1, 3.0, 3.0, Some("a"));
        in_progress.status = "in_progress".into();
        let no_actual = completed(2, 3.0, 0.0, Some("a"));
        let done = completed(3, 3.0, 4.0, None);

        let s = summarize(&[in_progress, no_actual, done]);
        assert_eq!(s.total_requirements, 3);
        assert_eq!(s.completed_requirements.len(), 1);
        assert_eq!(s.average_accuracy, 0.75);
        assert_eq!(s.best_performer, None);
    }

    #[test]
    fn best_performer_prefers_highest_mean_then_first_seen() {
        let reqs = vec![
            completed(1, 3.0, 4.0, Some("ana")),
            completed(2, 4.0, 4.0, Some("bo")),
            completed(3, 2.0, 4.0, Some("bo")),
            completed(4, 4.0, 4.0, Some("cy")),
        ];
        let s = summarize(&reqs);
        // ana 75, bo 75, cy 100
        assert_eq!(s.best_performer.as_deref(), Some("cy"));
        assert_eq!(s.trend, Trend::Improving);

        let tie = summarize(&reqs[..3]);
        assert_eq!(tie.best_performer.as_deref(), Some("ana"));
        assert_eq!(tie.trend, Trend::Stable);
    }

    #[test]
    fn report_covers_every_requirement() {
        let now = Utc::now();
        let project = Project {
            id: 1,
            name: "Portal".into(),
            description: None,
            creator: None,
            created_at: now,
            updated_at: now,
        };
        let open = Requirement::new(1, "open");
        let done = completed(2, 3.0, 4.0, Some("ana"));
        let report = build_report(&project, &[open, done], now);
        assert_eq!(report.project_name, "Portal");
        assert_eq!(report.requirements.len(), 2);
        assert_eq!(report.requirements[0].accuracy, 0.0);
        assert_eq!(report.requirements[0].value_assessor, "");
        assert_eq!(report.requirements[1].accuracy, 75.0);
    }
}
