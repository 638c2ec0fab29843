//! Student Handlers

use axum::{
    extract::{rejection::JsonRejection, Extension, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::application::dto::request::{StudentSignupRequest, UpdateStudentRequest};
use crate::application::dto::response::{IdResponse, StudentResponse};
use crate::application::services::StudentError;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validated;
use crate::startup::AppState;

/// Multipart field carrying the resume
const RESUME_FIELD: &str = "resume";

fn map_student_error(e: StudentError) -> AppError {
    match e {
        StudentError::NotFound => AppError::NotFound("Student not found".into()),
        StudentError::EmailAlreadyUsed => AppError::Conflict(e.to_string()),
        StudentError::Forbidden => AppError::Forbidden(e.to_string()),
        StudentError::InvalidResume => AppError::BadRequest(e.to_string()),
        StudentError::Validation(msg) => AppError::Validation(msg),
        StudentError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Sign up a student
///
/// POST /signup/student
pub async fn signup_student(
    State(state): State<AppState>,
    body: Result<Json<StudentSignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), AppError> {
    let body = validated(body)?;

    let student = state
        .student_service
        .register(body.into())
        .await
        .map_err(map_student_error)?;

    Ok((StatusCode::CREATED, Json(IdResponse::new(student.id))))
}

/// List all students
///
/// GET /students
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = state
        .student_service
        .find_all()
        .await
        .map_err(map_student_error)?;

    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Get a student by id
///
/// GET /students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = state
        .student_service
        .find_by_id(student_id)
        .await
        .map_err(map_student_error)?;

    Ok(Json(student.into()))
}

/// Edit the caller's own profile
///
/// PUT /students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(student_id): Path<Uuid>,
    body: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Result<Json<IdResponse>, AppError> {
    let requester_id = auth.student_id()?;
    let body = validated(body)?;

    let student = state
        .student_service
        .edit(student_id, requester_id, body.into())
        .await
        .map_err(map_student_error)?;

    Ok(Json(IdResponse::new(student.id)))
}

/// Upload a PDF resume
///
/// PUT /students/{id}/resume
///
/// Expects a multipart form with a `resume` file field.
pub async fn upload_resume(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(student_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<StudentResponse>, AppError> {
    let requester_id = auth.student_id()?;

    let mut upload: Option<(Option<String>, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read resume: {}", e)))?;
        upload = Some((content_type, bytes.to_vec()));
    }

    let (content_type, bytes) =
        upload.ok_or_else(|| AppError::BadRequest(format!("Missing `{}` file field", RESUME_FIELD)))?;

    let student = state
        .student_service
        .attach_resume(student_id, requester_id, content_type.as_deref(), &bytes)
        .await
        .map_err(map_student_error)?;

    Ok(Json(student.into()))
}

/// Delete the caller's own account
///
/// DELETE /students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(student_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let requester_id = auth.student_id()?;

    state
        .student_service
        .delete(student_id, requester_id)
        .await
        .map_err(map_student_error)?;

    Ok(StatusCode::NO_CONTENT)
}
