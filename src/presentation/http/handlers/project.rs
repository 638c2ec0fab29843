//! Project Handlers

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::response::ProjectResponse;
use crate::application::services::ProjectError;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub(super) fn map_project_error(e: ProjectError) -> AppError {
    match e {
        ProjectError::NotFound => AppError::NotFound("Project not found".into()),
        ProjectError::RepresentativeNotFound => AppError::NotFound("Representative not found".into()),
        ProjectError::Forbidden => AppError::Forbidden(e.to_string()),
        ProjectError::Validation(msg) => AppError::Validation(msg),
        ProjectError::Internal(msg) => AppError::Internal(msg),
    }
}

/// List all projects
///
/// GET /projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let projects = state
        .project_service
        .fetch_all()
        .await
        .map_err(map_project_error)?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// Delete a project of the caller's company
///
/// DELETE /projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(project_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let representative_id = auth.representative_id()?;

    state
        .project_service
        .delete(project_id, representative_id)
        .await
        .map_err(map_project_error)?;

    Ok(StatusCode::NO_CONTENT)
}
