//! Representative Handlers
//!
//! Representative profiles, invite links and project publishing.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::application::dto::request::{ProjectRequest, RepresentativeRequest};
use crate::application::dto::response::{IdResponse, InviteLinkResponse, RepresentativeResponse};
use crate::application::services::{InviteError, RepresentativeError};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validated;
use crate::startup::AppState;

use super::project::map_project_error;

fn map_representative_error(e: RepresentativeError) -> AppError {
    match e {
        RepresentativeError::NotFound => AppError::NotFound("Representative not found".into()),
        RepresentativeError::CompanyNotFound => AppError::NotFound("Company not found".into()),
        RepresentativeError::EmailAlreadyUsed => AppError::Conflict(e.to_string()),
        RepresentativeError::Validation(msg) => AppError::Validation(msg),
        RepresentativeError::Internal(msg) => AppError::Internal(msg),
    }
}

fn map_invite_error(e: InviteError) -> AppError {
    match e {
        InviteError::RepresentativeNotFound => AppError::NotFound("Representative not found".into()),
        InviteError::NotFound => AppError::NotFound("Invite link not found".into()),
        InviteError::CompanyNotFound => AppError::NotFound("Company not found".into()),
        InviteError::Expired => AppError::Gone(e.to_string()),
        InviteError::AlreadyUsed | InviteError::EmailAlreadyUsed => AppError::Conflict(e.to_string()),
        InviteError::Validation(msg) => AppError::Validation(msg),
        InviteError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Get a representative by id
///
/// GET /representatives/{id}
pub async fn get_representative(
    State(state): State<AppState>,
    Path(representative_id): Path<Uuid>,
) -> Result<Json<RepresentativeResponse>, AppError> {
    let representative = state
        .representative_service
        .find_by_id(representative_id)
        .await
        .map_err(map_representative_error)?;

    Ok(Json(representative.into()))
}

/// Issue an invite link for the caller's company
///
/// POST /representatives/invitelink
pub async fn create_invite_link(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<(StatusCode, Json<InviteLinkResponse>), AppError> {
    let representative_id = auth.representative_id()?;

    let link = state
        .invite_service
        .create_representative_invite(representative_id)
        .await
        .map_err(map_invite_error)?;

    Ok((StatusCode::CREATED, Json(InviteLinkResponse::at(link, Utc::now()))))
}

/// Invite links issued by the caller
///
/// GET /representatives/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<InviteLinkResponse>>, AppError> {
    let representative_id = auth.representative_id()?;

    let links = state
        .invite_service
        .find_by_creator(representative_id)
        .await
        .map_err(map_invite_error)?;

    let now = Utc::now();
    Ok(Json(links.into_iter().map(|l| InviteLinkResponse::at(l, now)).collect()))
}

/// Sign up as representative through an invite link
///
/// POST /signup/representatives/invite/{company_id}/{invite_id}
pub async fn signup_with_invite(
    State(state): State<AppState>,
    Path((company_id, invite_id)): Path<(Uuid, Uuid)>,
    body: Result<Json<RepresentativeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let body = validated(body)?;

    let representative = state
        .invite_service
        .redeem(company_id, invite_id, body.into())
        .await
        .map_err(map_invite_error)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(representative.id))))
}

/// Publish a project for the caller's company
///
/// POST /representatives/projects
pub async fn add_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let representative_id = auth.representative_id()?;
    let body = validated(body)?;

    let project = state
        .project_service
        .add_project(representative_id, body.into())
        .await
        .map_err(map_project_error)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(project.id))))
}
