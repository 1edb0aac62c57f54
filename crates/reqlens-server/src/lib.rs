//! # reqlens-server
//!
//! HTTP JSON API over the reqlens storage engine.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, lenses, milestones, projects, requirements, stakeholders};
pub use crate::state::AppState;

/// Build the full API router with cache-busting headers and request tracing.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/projects", get(projects::list_projects).post(projects::create_project))
        .route("/projects/:pid", get(projects::get_project).delete(projects::delete_project))
        .route("/projects/:pid/value-assessment", get(requirements::value_assessment))
        .route("/projects/:pid/value-report", get(requirements::value_report))
        .route(
            "/stakeholders/:pid",
            get(stakeholders::list_stakeholders).post(stakeholders::create_stakeholder),
        )
        .route(
            "/stakeholders/:pid/:sid",
            get(stakeholders::get_stakeholder)
                .put(stakeholders::update_stakeholder)
                .delete(stakeholders::delete_stakeholder),
        )
        .route(
            "/requirements/:pid",
            get(requirements::list_requirements).post(requirements::create_requirement),
        )
        .route("/requirements/detail/:rid", get(requirements::requirement_detail))
        .route(
            "/requirement/:rid",
            get(requirements::get_requirement)
                .put(requirements::update_requirement)
                .delete(requirements::delete_requirement),
        )
        .route("/requirement/:rid/update", post(requirements::update_status))
        .route("/requirement/:rid/assign", post(requirements::assign_milestone))
        .route("/requirement/:rid/actual-assessment", post(requirements::record_actual_assessment))
        .route(
            "/milestones/:pid",
            get(milestones::list_milestones).post(milestones::create_milestone),
        )
        .route(
            "/milestones/:pid/:mid",
            get(milestones::get_milestone)
                .put(milestones::update_milestone)
                .delete(milestones::delete_milestone),
        )
        .route("/milestone/:mid/requirements", put(milestones::set_requirements))
        .route("/roadmap/milestones/:pid", get(lenses::roadmap_milestones))
        .route("/roadmap/timeline/:pid", get(lenses::roadmap_timeline))
        .route("/roadmap/status-groups/:pid", get(lenses::roadmap_status_groups))
        .route("/kanban/:pid", get(lenses::kanban))
        .route("/kano/:pid", get(lenses::kano))
        .route("/analysis/:pid", get(lenses::analysis))
        .route("/comprehensive-analysis/:pid", get(lenses::comprehensive_analysis))
        .route("/vsm/:pid", get(lenses::vsm))
        .route("/smart-goals/:pid", get(lenses::smart_goals))
        .route("/wfmt/:pid", get(lenses::wfmt))
        .route("/diagnose/requirements/:pid", get(lenses::diagnose))
        .route("/diagnose/requirements/:pid/repair", post(lenses::repair));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
