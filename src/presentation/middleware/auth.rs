//! Authentication Middleware
//!
//! Session token validation for protected routes. The token is read from the
//! session cookie first, then from a `Bearer` authorization header.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::application::services::{AuthError, Claims};
use crate::domain::Role;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    /// Student or representative id
    pub role_id: Option<Uuid>,
}

impl AuthUser {
    /// Student id of the caller, or `Forbidden` for other roles.
    pub fn student_id(&self) -> Result<Uuid, AppError> {
        self.id_for(Role::Student)
    }

    /// Representative id of the caller, or `Forbidden` for other roles.
    pub fn representative_id(&self) -> Result<Uuid, AppError> {
        self.id_for(Role::Representative)
    }

    fn id_for(&self, role: Role) -> Result<Uuid, AppError> {
        match (self.role == role, self.role_id) {
            (true, Some(id)) => Ok(id),
            _ => Err(AppError::Forbidden(format!("Requires the {} role", role))),
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            role_id: claims.role_id,
        }
    }
}

fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = CookieJar::from_headers(headers).get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Authentication middleware that validates session tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(request.headers(), &state.settings.jwt.cookie_name)
        .ok_or_else(|| AppError::Unauthorized("Missing session token".into()))?;

    let claims = state
        .auth_service
        .validate_token(&token)
        .await
        .map_err(|e| match e {
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::Internal(msg) => AppError::Internal(msg),
            _ => AppError::Unauthorized("Invalid token".into()),
        })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
