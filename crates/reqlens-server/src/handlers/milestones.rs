use axum::extract::{Path, State};
use axum::Json;
use reqlens_core::model::{Milestone, MilestonePatch, NewMilestone};
use serde_json::Value;

use super::{created, ok};
use crate::dto::RequirementIds;
use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Ordered by deadline; milestones without one come last.
pub async fn list_milestones(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Vec<Milestone>>> {
    Ok(Json(state.run(move |engine| engine.list_milestones(pid)).await?))
}

pub async fn create_milestone(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
    JsonBody(new): JsonBody<NewMilestone>,
) -> ApiResult<Json<Value>> {
    let milestone = state.run(move |engine| engine.create_milestone(pid, new)).await?;
    Ok(created(milestone.id))
}

pub async fn get_milestone(
    State(state): State<AppState>,
    Path((pid, mid)): Path<(i64, i64)>,
) -> ApiResult<Json<Milestone>> {
    Ok(Json(state.run(move |engine| engine.get_milestone(pid, mid)).await?))
}

pub async fn update_milestone(
    State(state): State<AppState>,
    Path((pid, mid)): Path<(i64, i64)>,
    JsonBody(patch): JsonBody<MilestonePatch>,
) -> ApiResult<Json<Value>> {
    state
        .run(move |engine| engine.update_milestone(pid, mid, &patch))
        .await?;
    Ok(ok())
}

pub async fn delete_milestone(
    State(state): State<AppState>,
    Path((pid, mid)): Path<(i64, i64)>,
) -> ApiResult<Json<Value>> {
    state.run(move |engine| engine.delete_milestone(pid, mid)).await?;
    Ok(ok())
}

pub async fn set_requirements(
    State(state): State<AppState>,
    Path(mid): Path<i64>,
    JsonBody(body): JsonBody<RequirementIds>,
) -> ApiResult<Json<Value>> {
    state
        .run(move |engine| engine.set_milestone_requirements(mid, body.requirement_ids))
        .await?;
    Ok(ok())
}
