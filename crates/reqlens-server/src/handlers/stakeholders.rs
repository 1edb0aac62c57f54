use axum::extract::{Path, State};
use axum::Json;
use reqlens_core::model::{NewStakeholder, Stakeholder, StakeholderPatch};
use serde_json::Value;

use super::{created, ok};
use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::state::AppState;

pub async fn list_stakeholders(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Vec<Stakeholder>>> {
    Ok(Json(state.run(move |engine| engine.list_stakeholders(pid)).await?))
}

pub async fn create_stakeholder(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
    JsonBody(new): JsonBody<NewStakeholder>,
) -> ApiResult<Json<Value>> {
    let stakeholder = state.run(move |engine| engine.create_stakeholder(pid, new)).await?;
    Ok(created(stakeholder.id))
}

pub async fn get_stakeholder(
    State(state): State<AppState>,
    Path((pid, sid)): Path<(i64, i64)>,
) -> ApiResult<Json<Stakeholder>> {
    Ok(Json(state.run(move |engine| engine.get_stakeholder(pid, sid)).await?))
}

pub async fn update_stakeholder(
    State(state): State<AppState>,
    Path((pid, sid)): Path<(i64, i64)>,
    JsonBody(patch): JsonBody<StakeholderPatch>,
) -> ApiResult<Json<Value>> {
    state
        .run(move |engine| engine.update_stakeholder(pid, sid, &patch))
        .await?;
    Ok(ok())
}

pub async fn delete_stakeholder(
    State(state): State<AppState>,
    Path((pid, sid)): Path<(i64, i64)>,
) -> ApiResult<Json<Value>> {
    state.run(move |engine| engine.delete_stakeholder(pid, sid)).await?;
    Ok(ok())
}
