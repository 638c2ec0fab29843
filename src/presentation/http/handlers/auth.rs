//! Authentication Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::application::dto::request::SigninRequest;
use crate::application::dto::response::TokenResponse;
use crate::application::services::AuthError;
use crate::shared::error::AppError;
use crate::shared::validation::validated;
use crate::startup::AppState;

fn map_auth_error(e: AuthError) -> AppError {
    match e {
        AuthError::InvalidCredentials => AppError::Unauthorized("Invalid email or password".into()),
        AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
        AuthError::InvalidToken => AppError::Unauthorized("Invalid token".into()),
        AuthError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Sign in with credentials
///
/// POST /signin
///
/// Returns the session token and also sets it as an `HttpOnly` cookie.
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let body = validated(body)?;

    let session = state
        .auth_service
        .signin(&body.email, &body.password)
        .await
        .map_err(map_auth_error)?;

    let max_age = match std::time::Duration::from_secs(session.expires_in.max(0) as u64).try_into() {
        Ok(max_age) => max_age,
        Err(_) => return Err(AppError::Internal("Invalid cookie lifetime".into())),
    };

    let cookie = Cookie::build((state.settings.jwt.cookie_name.clone(), session.token.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age);

    Ok((jar.add(cookie), Json(TokenResponse::from(session))))
}

/// Sign out by expiring the session cookie
///
/// POST /signout
pub async fn signout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let cookie = Cookie::build((state.settings.jwt.cookie_name.clone(), "")).path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}
