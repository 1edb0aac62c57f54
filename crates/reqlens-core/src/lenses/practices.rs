//! Lenses for the VSM, SMART and WFMT analysis practices.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::Requirement;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VsmEntry {
    pub id: i64,
    pub title: String,
    pub vsm_process_steps: Option<String>,
    pub cycle_time: Option<f64>,
    pub lead_time: Option<f64>,
    pub process_efficiency: Option<f64>,
    pub vsm_current_state: Option<String>,
    pub vsm_future_state: Option<String>,
}

/// Stored efficiency, else `cycle_time / lead_time * 100` when both are known.
fn efficiency(cycle_time: Option<f64>, lead_time: Option<f64>, stored: Option<f64>) -> Option<f64> {
    stored.or(match (cycle_time, lead_time) {
        (Some(cycle), Some(lead)) if lead > 0.0 => Some(cycle / lead * 100.0),
        _ => None,
    })
}

/// Requirements that carry any value-stream data.
pub fn vsm_entries(requirements: &[Requirement]) -> Vec<VsmEntry> {
    requirements
        .iter()
        .filter(|r| r.analysis.vsm.has_data())
        .map(|r| {
            let v = &r.analysis.vsm;
            VsmEntry {
                id: r.id,
                title: r.title.clone(),
                vsm_process_steps: v.vsm_process_steps.clone(),
                cycle_time: v.cycle_time,
                lead_time: v.lead_time,
                process_efficiency: efficiency(v.cycle_time, v.lead_time, v.process_efficiency),
                vsm_current_state: v.vsm_current_state.clone(),
                vsm_future_state: v.vsm_future_state.clone(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartEntry {
    pub id: i64,
    pub title: String,
    pub smart_specific: Option<String>,
    pub smart_measurable: Option<String>,
    pub smart_achievable: Option<bool>,
    pub smart_relevant: Option<String>,
    pub smart_timebound: Option<NaiveDate>,
    pub smart_target_level: Option<String>,
    pub is_complete: bool,
}

fn filled(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

/// SMART breakdown of every requirement.
/// Complete means all five dimensions are filled in and achievable is `true`.
pub fn smart_entries(requirements: &[Requirement]) -> Vec<SmartEntry> {
    requirements
        .iter()
        .map(|r| {
            let s = &r.analysis.smart;
            SmartEntry {
                id: r.id,
                title: r.title.clone(),
                smart_specific: s.smart_specific.clone(),
                smart_measurable: s.smart_measurable.clone(),
                smart_achievable: s.smart_achievable,
                smart_relevant: s.smart_relevant.clone(),
                smart_timebound: s.smart_timebound,
                smart_target_level: s.smart_target_level.clone(),
                is_complete: filled(&s.smart_specific)
                    && filled(&s.smart_measurable)
                    && s.smart_achievable == Some(true)
                    && filled(&s.smart_relevant)
                    && s.smart_timebound.is_some(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WfmtEntry {
    pub id: i64,
    pub title: String,
    pub wfmt_analysis: Option<String>,
    pub standard_time: Option<f64>,
    pub improvement_potential: Option<f64>,
    pub wfmt_tmu_total: Option<f64>,
    pub wfmt_allowance_rate: Option<f64>,
}

/// Requirements that carry any work-measurement data.
pub fn wfmt_entries(requirements: &[Requirement]) -> Vec<WfmtEntry> {
    requirements
        .iter()
        .filter(|r| r.analysis.wfmt.has_data())
        .map(|r| {
            let w = &r.analysis.wfmt;
            WfmtEntry {
                id: r.id,
                title: r.title.clone(),
                wfmt_analysis: w.wfmt_analysis.clone(),
                standard_time: w.standard_time,
                improvement_potential: w.improvement_potential,
                wfmt_tmu_total: w.wfmt_tmu_total,
                wfmt_allowance_rate: w.wfmt_allowance_rate,
            }
        })
        .collect()
}
