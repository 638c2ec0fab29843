//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use super::handlers;
use crate::presentation::middleware::{auth_middleware, logging};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(student_routes(state.clone()))
        .merge(company_routes(state.clone()))
        .merge(representative_routes(state.clone()))
        .merge(project_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(handlers::health::metrics_handler))
        .route_layer(middleware::from_fn(logging::track_metrics))
        .with_state(state)
}

/// Signup and session routes (public)
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signin", post(handlers::auth::signin))
        .route("/signout", post(handlers::auth::signout))
        .route("/signup/student", post(handlers::student::signup_student))
        .route("/signup/company", post(handlers::company::signup_company))
        .route(
            "/signup/representatives/invite/{company_id}/{invite_id}",
            post(handlers::representative::signup_with_invite),
        )
        .route("/companies/{id}/name", get(handlers::company::get_company_name))
}

/// Student routes (protected)
fn student_routes(state: AppState) -> Router<AppState> {
    let resume_limit = state.settings.uploads.max_resume_bytes;

    Router::new()
        .route("/students", get(handlers::student::list_students))
        .route(
            "/students/{id}",
            get(handlers::student::get_student)
                .put(handlers::student::update_student)
                .delete(handlers::student::delete_student),
        )
        .route(
            "/students/{id}/resume",
            put(handlers::student::upload_resume).layer(DefaultBodyLimit::max(resume_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Company routes (protected)
fn company_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/companies", get(handlers::company::list_companies))
        .route(
            "/companies/{id}",
            get(handlers::company::get_company).put(handlers::company::update_company),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Representative routes (protected)
fn representative_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/representatives/{id}", get(handlers::representative::get_representative))
        .route(
            "/representatives/invitelink",
            post(handlers::representative::create_invite_link),
        )
        .route(
            "/representatives/invitations",
            get(handlers::representative::list_invitations),
        )
        .route("/representatives/projects", post(handlers::representative::add_project))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Project routes (protected)
fn project_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::project::list_projects))
        .route("/projects/{id}", delete(handlers::project::delete_project))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
