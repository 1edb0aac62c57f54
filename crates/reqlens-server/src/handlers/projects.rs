use axum::extract::{Path, Query, State};
use axum::Json;
use reqlens_core::model::{NewProject, Project, ProjectDetail};
use serde_json::{json, Value};

use super::created;
use crate::dto::ProjectFilter;
use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::state::AppState;

pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state
        .run(move |engine| engine.list_projects(filter.creator.as_deref()))
        .await?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<NewProject>,
) -> ApiResult<Json<Value>> {
    let project = state.run(move |engine| engine.create_project(&new)).await?;
    Ok(created(project.id))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<ProjectDetail>> {
    Ok(Json(state.run(move |engine| engine.project_detail(pid)).await?))
}

/// Removes the project with all its stakeholders, requirements and milestones.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(pid): Path<i64>,
) -> ApiResult<Json<Value>> {
    let counts = state.run(move |engine| engine.delete_project(pid)).await?;
    Ok(Json(json!({
        "success": true,
        "deleted": {
            "stakeholders": counts.stakeholders,
            "requirements": counts.requirements,
            "milestones": counts.milestones,
        },
    })))
}
