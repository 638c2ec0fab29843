//! Authentication Service
//!
//! Credential checks and JWT session tokens. Tokens are stateless; signing
//! out only clears the client cookie.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user_service::{UserError, UserService};
use crate::config::JwtSettings;
use crate::domain::{Role, User};

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate with email and password
    async fn signin(&self, email: &str, password: &str) -> Result<SessionToken, AuthError>;

    /// Validate a session token and return its claims
    async fn validate_token(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Issued session token
#[derive(Debug, Clone, Serialize)]
pub struct SessionToken {
    pub token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    /// Student or representative id owned by the user
    pub role_id: Option<Uuid>,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound => AuthError::InvalidCredentials,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl {
    users: Arc<dyn UserService>,
    jwt_settings: JwtSettings,
}

impl AuthServiceImpl {
    /// Create a new AuthServiceImpl
    pub fn new(users: Arc<dyn UserService>, jwt_settings: JwtSettings) -> Self {
        Self { users, jwt_settings }
    }

    fn issue_token(&self, user: &User, role_id: Option<Uuid>) -> Result<SessionToken, AuthError> {
        let now = Utc::now();
        let lifetime = Duration::hours(self.jwt_settings.expiry_hours);
        let expires_at = now + lifetime;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            role_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(SessionToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: lifetime.num_seconds(),
            expires_at,
        })
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn signin(&self, email: &str, password: &str) -> Result<SessionToken, AuthError> {
        let user = self.users.find_by_email(email).await?;

        if !self.users.validate_password(&user.password_hash, password)? {
            tracing::warn!(user_id = %user.id, "Sign-in with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let role_id = self.users.find_role_id(&user).await?;
        let session = self.issue_token(&user, role_id)?;

        tracing::info!(user_id = %user.id, role = %user.role, "User signed in");
        Ok(session)
    }

    async fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}
