//! Read-only dashboard views and the requirement diagnosis.

use axum::extract::{Path, State};
use axum::Json;
use reqlens_core::lenses::{
    self, AnalysisOverview, KanbanBoard, RoadmapMilestone, RoadmapStatusGroups, SmartEntry,
    TimelineEntry, VsmEntry, WfmtEntry,
};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn roadmap_milestones(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Vec<RoadmapMilestone>>> {
    let snap = state.run(move |engine| engine.project_snapshot(pid)).await?;
    Ok(Json(lenses::roadmap_milestones(&snap.milestones, &snap.requirements)))
}

pub async fn roadmap_timeline(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Vec<TimelineEntry>>> {
    let snap = state.run(move |engine| engine.project_snapshot(pid)).await?;
    Ok(Json(lenses::timeline(&snap.milestones, &snap.requirements)))
}

pub async fn roadmap_status_groups(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<RoadmapStatusGroups>> {
    let requirements = state.run(move |engine| engine.list_requirements(pid)).await?;
    Ok(Json(lenses::roadmap_status_groups(&requirements)))
}

pub async fn kanban(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<KanbanBoard>> {
    let requirements = state.run(move |engine| engine.list_requirements(pid)).await?;
    Ok(Json(lenses::kanban_board(&requirements)))
}

pub async fn kano(State(state): State<AppState>, Path(pid): Path<i64>) -> ApiResult<Json<Value>> {
    let requirements = state.run(move |engine| engine.list_requirements(pid)).await?;
    let groups = lenses::kano_groups(&requirements);
    Ok(Json(json!({ "success": true, "kano_groups": groups })))
}

/// Summary cards plus priority and category counts, without an envelope.
pub async fn analysis(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<AnalysisOverview>> {
    let requirements = state.run(move |engine| engine.list_requirements(pid)).await?;
    Ok(Json(lenses::analysis_overview(&requirements)))
}

pub async fn comprehensive_analysis(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Value>> {
    let (project, requirements) =
        state.run(move |engine| engine.project_requirements(pid)).await?;
    let analysis = lenses::comprehensive_analysis(&project, &requirements);
    Ok(Json(json!({
        "success": true,
        "project": analysis.project,
        "requirements_count": analysis.requirements_count,
        "requirements_by_status": analysis.requirements_by_status,
        "requirements_by_priority": analysis.requirements_by_priority,
        "requirements_by_type": analysis.requirements_by_type,
    })))
}

pub async fn vsm(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Vec<VsmEntry>>> {
    let requirements = state.run(move |engine| engine.list_requirements(pid)).await?;
    Ok(Json(lenses::vsm_entries(&requirements)))
}

pub async fn smart_goals(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Vec<SmartEntry>>> {
    let requirements = state.run(move |engine| engine.list_requirements(pid)).await?;
    Ok(Json(lenses::smart_entries(&requirements)))
}

pub async fn wfmt(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Vec<WfmtEntry>>> {
    let requirements = state.run(move |engine| engine.list_requirements(pid)).await?;
    Ok(Json(lenses::wfmt_entries(&requirements)))
}

pub async fn diagnose(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Value>> {
    let diagnosis = state.run(move |engine| engine.diagnose(pid)).await?;
    Ok(Json(json!({ "success": true, "diagnosis": diagnosis })))
}

/// Reassign orphaned requirements whose title names this project.
pub async fn repair(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Value>> {
    let outcome = state.run(move |engine| engine.repair_requirements(pid)).await?;
    Ok(Json(json!({
        "success": true,
        "repaired": outcome.repaired_ids.len(),
        "requirement_ids": outcome.repaired_ids,
    })))
}
