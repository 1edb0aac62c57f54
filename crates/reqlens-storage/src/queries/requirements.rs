//! requirements table.
//!
//! The row is wide, so inserts and updates are generated from one
//! column/value list instead of hand-numbered placeholders. Reads go by
//! column name.

use chrono::{DateTime, Utc};
use reqlens_core::errors::StorageError;
use reqlens_core::model::{
    InsightData, KanoData, NineElements, Requirement, RequirementAnalysis, SmartData,
    ValueAssessment, VsmData, WfmtData,
};
use rusqlite::{params, params_from_iter, Connection, Row, ToSql};

use super::{affected, optional};
use crate::errors::sqlite_err;

macro_rules! columns {
    ($($name:literal => $value:expr),* $(,)?) => {
        vec![$(($name, $value as &dyn ToSql)),*]
    };
}

/// Every stored column except `id`, paired with its value.
fn bindings(r: &Requirement) -> Vec<(&'static str, &dyn ToSql)> {
    let e = &r.elements;
    let a = &r.assessment;
    let vsm = &r.analysis.vsm;
    let kano = &r.analysis.kano;
    let smart = &r.analysis.smart;
    let wfmt = &r.analysis.wfmt;
    let i = &r.analysis.insight;
    columns![
        "project_id" => &r.project_id,
        "title" => &r.title,
        "requirement_type" => &r.requirement_type,
        "scenario" => &e.scenario,
        "problem" => &e.problem,
        "current_solution" => &e.current_solution,
        "goal" => &e.goal,
        "expected_solution" => &e.expected_solution,
        "value" => &e.value,
        "priority_level" => &r.priority_level,
        "other_info" => &e.other_info,
        "source" => &r.source,
        "category" => &r.category,
        "priority" => &r.priority,
        "status" => &r.status,
        "acceptance_criteria" => &r.acceptance_criteria,
        "estimated_business_value" => &a.estimated_business_value,
        "estimated_user_value" => &a.estimated_user_value,
        "estimated_technical_value" => &a.estimated_technical_value,
        "estimated_effort" => &a.estimated_effort,
        "estimated_roi" => &a.estimated_roi,
        "actual_business_value" => &a.actual_business_value,
        "actual_user_value" => &a.actual_user_value,
        "actual_technical_value" => &a.actual_technical_value,
        "actual_effort" => &a.actual_effort,
        "actual_roi" => &a.actual_roi,
        "value_assessor" => &a.value_assessor,
        "value_assessment_date" => &a.value_assessment_date,
        "actual_value_assessor" => &a.actual_value_assessor,
        "actual_value_assessment_date" => &a.actual_value_assessment_date,
        "expected_completion_date" => &r.expected_completion_date,
        "assigned_milestone_id" => &r.assigned_milestone_id,
        "vsm_process_steps" => &vsm.vsm_process_steps,
        "cycle_time" => &vsm.cycle_time,
        "lead_time" => &vsm.lead_time,
        "process_efficiency" => &vsm.process_efficiency,
        "vsm_current_state" => &vsm.vsm_current_state,
        "vsm_future_state" => &vsm.vsm_future_state,
        "kano_category" => &kano.kano_category,
        "kano_survey_data" => &kano.kano_survey_data,
        "kano_priority_score" => &kano.kano_priority_score,
        "kano_positive_answer" => &kano.kano_positive_answer,
        "kano_negative_answer" => &kano.kano_negative_answer,
        "smart_specific" => &smart.smart_specific,
        "smart_measurable" => &smart.smart_measurable,
        "smart_achievable" => &smart.smart_achievable,
        "smart_relevant" => &smart.smart_relevant,
        "smart_timebound" => &smart.smart_timebound,
        "smart_target_level" => &smart.smart_target_level,
        "wfmt_analysis" => &wfmt.wfmt_analysis,
        "standard_time" => &wfmt.standard_time,
        "improvement_potential" => &wfmt.improvement_potential,
        "wfmt_tmu_total" => &wfmt.wfmt_tmu_total,
        "wfmt_allowance_rate" => &wfmt.wfmt_allowance_rate,
        "user_research_data" => &i.user_research_data,
        "user_feedback" => &i.user_feedback,
        "user_satisfaction" => &i.user_satisfaction,
        "target_user_group" => &i.target_user_group,
        "competitor_analysis" => &i.competitor_analysis,
        "competitor_products" => &i.competitor_products,
        "competitive_advantage" => &i.competitive_advantage,
        "market_research" => &i.market_research,
        "market_size" => &i.market_size,
        "market_trends" => &i.market_trends,
        "current_state_analysis" => &i.current_state_analysis,
        "product_lifecycle_stage" => &i.product_lifecycle_stage,
        "technical_constraints" => &i.technical_constraints,
        "resource_constraints" => &i.resource_constraints,
        "short_term_plan" => &i.short_term_plan,
        "medium_term_plan" => &i.medium_term_plan,
        "long_term_plan" => &i.long_term_plan,
        "strategic_alignment" => &i.strategic_alignment,
        "risk_assessment" => &i.risk_assessment,
        "technical_risks" => &i.technical_risks,
        "business_risks" => &i.business_risks,
        "implementation_risks" => &i.implementation_risks,
        "development_cost_estimate" => &i.development_cost_estimate,
        "operational_cost_estimate" => &i.operational_cost_estimate,
        "expected_revenue" => &i.expected_revenue,
        "cost_benefit_analysis" => &i.cost_benefit_analysis,
        "implementation_priority" => &i.implementation_priority,
        "dependencies" => &i.dependencies,
        "alternative_solutions" => &i.alternative_solutions,
        "success_metrics" => &i.success_metrics,
        "created_at" => &r.created_at,
        "updated_at" => &r.updated_at,
    ]
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Requirement> {
    // Template columns are NOT NULL today but may be NULL in imported rows.
    let text = |col: &str| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(col)?.unwrap_or_default())
    };
    Ok(Requirement {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        title: text("title")?,
        requirement_type: text("requirement_type")?,
        elements: NineElements {
            scenario: text("scenario")?,
            problem: text("problem")?,
            current_solution: text("current_solution")?,
            goal: text("goal")?,
            expected_solution: text("expected_solution")?,
            value: text("value")?,
            other_info: text("other_info")?,
        },
        priority_level: text("priority_level")?,
        source: text("source")?,
        category: text("category")?,
        priority: text("priority")?,
        status: text("status")?,
        acceptance_criteria: text("acceptance_criteria")?,
        assessment: ValueAssessment {
            estimated_business_value: row.get("estimated_business_value")?,
            estimated_user_value: row.get("estimated_user_value")?,
            estimated_technical_value: row.get("estimated_technical_value")?,
            estimated_effort: row.get("estimated_effort")?,
            estimated_roi: row.get("estimated_roi")?,
            actual_business_value: row.get("actual_business_value")?,
            actual_user_value: row.get("actual_user_value")?,
            actual_technical_value: row.get("actual_technical_value")?,
            actual_effort: row.get("actual_effort")?,
            actual_roi: row.get("actual_roi")?,
            value_assessor: row.get("value_assessor")?,
            value_assessment_date: row.get("value_assessment_date")?,
            actual_value_assessor: row.get("actual_value_assessor")?,
            actual_value_assessment_date: row.get("actual_value_assessment_date")?,
        },
        expected_completion_date: row.get("expected_completion_date")?,
        assigned_milestone_id: row.get("assigned_milestone_id")?,
        analysis: RequirementAnalysis {
            vsm: VsmData {
                vsm_process_steps: row.get("vsm_process_steps")?,
                cycle_time: row.get("cycle_time")?,
                lead_time: row.get("lead_time")?,
                process_efficiency: row.get("process_efficiency")?,
                vsm_current_state: row.get("vsm_current_state")?,
                vsm_future_state: row.get("vsm_future_state")?,
            },
            kano: KanoData {
                kano_category: row.get("kano_category")?,
                kano_survey_data: row.get("kano_survey_data")?,
                kano_priority_score: row.get("kano_priority_score")?,
                kano_positive_answer: row.get("kano_positive_answer")?,
                kano_negative_answer: row.get("kano_negative_answer")?,
            },
            smart: SmartData {
                smart_specific: row.get("smart_specific")?,
                smart_measurable: row.get("smart_measurable")?,
                smart_achievable: row.get("smart_achievable")?,
                smart_relevant: row.get("smart_relevant")?,
                smart_timebound: row.get("smart_timebound")?,
                smart_target_level: row.get("smart_target_level")?,
            },
            wfmt: WfmtData {
                wfmt_analysis: row.get("wfmt_analysis")?,
                standard_time: row.get("standard_time")?,
                improvement_potential: row.get("improvement_potential")?,
                wfmt_tmu_total: row.get("wfmt_tmu_total")?,
                wfmt_allowance_rate: row.get("wfmt_allowance_rate")?,
            },
            insight: InsightData {
                user_research_data: row.get("user_research_data")?,
                user_feedback: row.get("user_feedback")?,
                user_satisfaction: row.get("user_satisfaction")?,
                target_user_group: row.get("target_user_group")?,
                competitor_analysis: row.get("competitor_analysis")?,
                competitor_products: row.get("competitor_products")?,
                competitive_advantage: row.get("competitive_advantage")?,
                market_research: row.get("market_research")?,
                market_size: row.get("market_size")?,
                market_trends: row.get("market_trends")?,
                current_state_analysis: row.get("current_state_analysis")?,
                product_lifecycle_stage: row.get("product_lifecycle_stage")?,
                technical_constraints: row.get("technical_constraints")?,
                resource_constraints: row.get("resource_constraints")?,
                short_term_plan: row.get("short_term_plan")?,
                medium_term_plan: row.get("medium_term_plan")?,
                long_term_plan: row.get("long_term_plan")?,
                strategic_alignment: row.get("strategic_alignment")?,
                risk_assessment: row.get("risk_assessment")?,
                technical_risks: row.get("technical_risks")?,
                business_risks: row.get("business_risks")?,
                implementation_risks: row.get("implementation_risks")?,
                development_cost_estimate: row.get("development_cost_estimate")?,
                operational_cost_estimate: row.get("operational_cost_estimate")?,
                expected_revenue: row.get("expected_revenue")?,
                cost_benefit_analysis: row.get("cost_benefit_analysis")?,
                implementation_priority: row.get("implementation_priority")?,
                dependencies: row.get("dependencies")?,
                alternative_solutions: row.get("alternative_solutions")?,
                success_metrics: row.get("success_metrics")?,
            },
        },
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Insert a requirement and return its new id. `r.id` is ignored.
pub fn insert_requirement(conn: &Connection, r: &Requirement) -> Result<i64, StorageError> {
    let cols = bindings(r);
    let names: Vec<&str> = cols.iter().map(|(name, _)| *name).collect();
    let placeholders: Vec<String> = (1..=cols.len()).map(|n| format!("?{n}")).collect();
    let sql = format!(
        "INSERT INTO requirements ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    stmt.execute(params_from_iter(cols.iter().map(|(_, v)| *v)))
        .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every stored column of `r` except `id` and `created_at`.
pub fn update_requirement(conn: &Connection, r: &Requirement) -> Result<(), StorageError> {
    let cols: Vec<(&str, &dyn ToSql)> = bindings(r)
        .into_iter()
        .filter(|(name, _)| *name != "created_at")
        .collect();
    let assignments: Vec<String> = cols
        .iter()
        .enumerate()
        .map(|(n, (name, _))| format!("{name} = ?{}", n + 1))
        .collect();
    let sql = format!(
        "UPDATE requirements SET {} WHERE id = ?{}",
        assignments.join(", "),
        cols.len() + 1
    );
    let mut values: Vec<&dyn ToSql> = cols.iter().map(|(_, v)| *v).collect();
    values.push(&r.id);

    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let n = affected(stmt.execute(params_from_iter(values)))?;
    if n == 0 {
        return Err(StorageError::not_found("requirement", r.id));
    }
    Ok(())
}

pub fn get_requirement(conn: &Connection, id: i64) -> Result<Option<Requirement>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT * FROM requirements WHERE id = ?1")
        .map_err(sqlite_err)?;
    optional(stmt.query_row(params![id], map_row))
}

/// Requirements of one project in creation order.
pub fn list_requirements(
    conn: &Connection,
    project_id: i64,
) -> Result<Vec<Requirement>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT * FROM requirements WHERE project_id = ?1 ORDER BY id")
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![project_id], map_row)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Every requirement regardless of project, including orphans.
pub fn list_all_requirements(conn: &Connection) -> Result<Vec<Requirement>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT * FROM requirements ORDER BY id")
        .map_err(sqlite_err)?;
    let rows = stmt.query_map([], map_row).map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

pub fn set_assigned_milestone(
    conn: &Connection,
    id: i64,
    milestone_id: Option<i64>,
    now: DateTime<Utc>,
) -> Result<(), StorageError> {
    let n = affected(conn.execute(
        "UPDATE requirements SET assigned_milestone_id = ?2, updated_at = ?3 WHERE id = ?1",
        params![id, milestone_id, now],
    ))?;
    if n == 0 {
        return Err(StorageError::not_found("requirement", id));
    }
    Ok(())
}

/// Move the given requirements to `project_id`. Returns how many moved.
pub fn reassign_project(
    conn: &Connection,
    ids: &[i64],
    project_id: i64,
    now: DateTime<Utc>,
) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached("UPDATE requirements SET project_id = ?2, updated_at = ?3 WHERE id = ?1")
        .map_err(sqlite_err)?;
    let mut moved = 0;
    for id in ids {
        moved += affected(stmt.execute(params![id, project_id, now]))?;
    }
    Ok(moved)
}

/// Returns true if a row was deleted.
pub fn delete_requirement(conn: &Connection, id: i64) -> Result<bool, StorageError> {
    let n = affected(conn.execute("DELETE FROM requirements WHERE id = ?1", params![id]))?;
    Ok(n > 0)
}
