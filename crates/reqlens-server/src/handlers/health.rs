use axum::extract::State;
use axum::Json;
use reqlens_core::constants::VERSION;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::state::AppState;

/// Liveness plus the applied schema version.
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let schema_version = state.run(|engine| engine.schema_version()).await?;
    Ok(Json(json!({
        "status": "ok",
        "version": VERSION,
        "schema_version": schema_version,
    })))
}
