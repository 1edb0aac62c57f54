use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use reqlens_core::model::{NewRequirement, RequirementPatch};
use reqlens_core::valuation::{self, ActualAssessment, ValueAssessmentSummary};
use serde_json::{json, Value};

use super::{created, ok};
use crate::dto::{
    MilestoneAssignment, RequirementDetail, RequirementListItem, RequirementView, StatusUpdate,
};
use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::state::AppState;

/// Views borrow the loaded requirement, so they are serialized in place.
fn to_json<T: serde::Serialize>(view: &T) -> ApiResult<Value> {
    serde_json::to_value(view).map_err(|e| ApiError::Internal(e.to_string()))
}

pub async fn list_requirements(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Vec<RequirementListItem>>> {
    let requirements = state.run(move |engine| engine.list_requirements(pid)).await?;
    Ok(Json(requirements.iter().map(RequirementListItem::from).collect()))
}

pub async fn create_requirement(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
    JsonBody(new): JsonBody<NewRequirement>,
) -> ApiResult<Json<Value>> {
    let requirement = state.run(move |engine| engine.create_requirement(pid, new)).await?;
    Ok(created(requirement.id))
}

pub async fn get_requirement(
    State(state): State<AppState>,
    Path(rid): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let requirement = state.run(move |engine| engine.get_requirement(rid)).await?;
    Ok(Json(to_json(&RequirementView::from(&requirement))?))
}

pub async fn requirement_detail(
    State(state): State<AppState>,
    Path(rid): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let requirement = state.run(move |engine| engine.get_requirement(rid)).await?;
    Ok(Json(to_json(&RequirementDetail::from(&requirement))?))
}

pub async fn update_requirement(
    State(state): State<AppState>,
    Path(rid): Path<i64>,
    JsonBody(patch): JsonBody<RequirementPatch>,
) -> ApiResult<Json<Value>> {
    state.run(move |engine| engine.update_requirement(rid, &patch)).await?;
    Ok(ok())
}

pub async fn delete_requirement(
    State(state): State<AppState>,
    Path(rid): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.run(move |engine| engine.delete_requirement(rid)).await?;
    Ok(ok())
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(rid): Path<i64>,
    JsonBody(body): JsonBody<StatusUpdate>,
) -> ApiResult<Json<Value>> {
    state
        .run(move |engine| engine.set_status_priority(rid, body.status, body.priority))
        .await?;
    Ok(ok())
}

pub async fn assign_milestone(
    State(state): State<AppState>,
    Path(rid): Path<i64>,
    JsonBody(body): JsonBody<MilestoneAssignment>,
) -> ApiResult<Json<Value>> {
    state
        .run(move |engine| engine.assign_milestone(rid, body.milestone_id))
        .await?;
    Ok(ok())
}

pub async fn record_actual_assessment(
    State(state): State<AppState>,
    Path(rid): Path<i64>,
    JsonBody(body): JsonBody<ActualAssessment>,
) -> ApiResult<Json<Value>> {
    let requirement = state
        .run(move |engine| engine.record_actual_assessment(rid, &body))
        .await?;
    Ok(Json(json!({
        "success": true,
        "actual_roi": requirement.assessment.actual_roi,
    })))
}

pub async fn value_assessment(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<ValueAssessmentSummary>> {
    let (_, requirements) = state.run(move |engine| engine.project_requirements(pid)).await?;
    Ok(Json(valuation::summarize(&requirements)))
}

/// Value report served as a JSON attachment.
pub async fn value_report(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let (project, requirements) = state.run(move |engine| engine.project_requirements(pid)).await?;
    let report = valuation::build_report(&project, &requirements, Utc::now());
    let disposition = format!("attachment; filename=value_report_{pid}.json");
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(report)))
}
