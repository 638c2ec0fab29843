//! Company Handlers

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::request::{CompanySignupRequest, UpdateCompanyRequest};
use crate::application::dto::response::{CompanyResponse, IdResponse, NameResponse};
use crate::application::services::CompanyError;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validated;
use crate::startup::AppState;

fn map_company_error(e: CompanyError) -> AppError {
    match e {
        CompanyError::NotFound => AppError::NotFound("Company not found".into()),
        CompanyError::CompanyNameAlreadyUsed | CompanyError::EmailAlreadyUsed => AppError::Conflict(e.to_string()),
        CompanyError::Forbidden => AppError::Forbidden(e.to_string()),
        CompanyError::Validation(msg) => AppError::Validation(msg),
        CompanyError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Sign up a company with its main representative
///
/// POST /signup/company
pub async fn signup_company(
    State(state): State<AppState>,
    body: Result<Json<CompanySignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let body = validated(body)?;

    let company = state
        .company_service
        .register(body.into())
        .await
        .map_err(map_company_error)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(company.id))))
}

/// List all companies
///
/// GET /companies
pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let companies = state
        .company_service
        .find_all()
        .await
        .map_err(map_company_error)?;

    Ok(Json(companies.into_iter().map(Into::into).collect()))
}

/// Get a company aggregate
///
/// GET /companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<CompanyResponse>, AppError> {
    let company = state
        .company_service
        .find_by_id(company_id)
        .await
        .map_err(map_company_error)?;

    Ok(Json(company.into()))
}

/// Public company name lookup, used by the invite signup page
///
/// GET /companies/{id}/name
pub async fn get_company_name(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<NameResponse>, AppError> {
    let name = state
        .company_service
        .find_name_by_id(company_id)
        .await
        .map_err(map_company_error)?;

    Ok(Json(NameResponse { name }))
}

/// Edit a company; addresses and projects not in the body are kept
///
/// PUT /companies/{id}
pub async fn update_company(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(company_id): Path<Uuid>,
    body: Result<Json<UpdateCompanyRequest>, JsonRejection>,
) -> Result<Json<IdResponse>, AppError> {
    let editor_id = auth.representative_id()?;
    let body = validated(body)?;

    let company = state
        .company_service
        .edit(company_id, editor_id, body.into())
        .await
        .map_err(map_company_error)?;

    Ok(Json(IdResponse::new(company.id)))
}
