//! Route handlers, one module per resource.

pub mod health;
pub mod lenses;
pub mod milestones;
pub mod projects;
pub mod requirements;
pub mod stakeholders;

use axum::Json;
use serde_json::{json, Value};

/// `{"success": true}`.
pub(crate) fn ok() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// `{"success": true, "id": id}` for creations.
pub(crate) fn created(id: i64) -> Json<Value> {
    Json(json!({ "success": true, "id": id }))
}
