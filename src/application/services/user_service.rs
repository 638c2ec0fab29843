//! User Service
//!
//! Email uniqueness and credential checks shared by every account type.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{RepositoryError, Role, User, UserRepository};
use crate::shared::password;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Persist a standalone user
    async fn register(&self, user: &User) -> Result<(), UserError>;

    async fn find_by_id(&self, id: Uuid) -> Result<User, UserError>;

    async fn find_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Whether the (case-normalized) email is bound to an account
    async fn email_already_used(&self, email: &str) -> Result<bool, UserError>;

    /// Id of the student or representative owning the user
    async fn find_role_id(&self, user: &User) -> Result<Option<Uuid>, UserError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only a malformed hash is an error.
    fn validate_password(&self, hash: &str, plaintext: &str) -> Result<bool, UserError>;
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("email is already in use and bound to an account")]
    EmailAlreadyUsed,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for UserError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::EmailTaken => UserError::EmailAlreadyUsed,
            RepositoryError::NotFound => UserError::NotFound,
            other => UserError::Internal(other.to_string()),
        }
    }
}

/// Raw account fields submitted at signup.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewAccount {
    /// Hash the password and build a validated user with the given role.
    pub fn into_user(self, role: Role) -> Result<User, UserError> {
        if self.password.is_empty() {
            return Err(UserError::Validation("provided password can't be empty".into()));
        }

        let hash = password::hash_password(&self.password)
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))?;

        User::new(&self.email, hash, &self.first_name, &self.last_name, role)
            .map_err(|e| UserError::Validation(e.to_string()))
    }
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn register(&self, user: &User) -> Result<(), UserError> {
        if self.email_already_used(&user.email).await? {
            return Err(UserError::EmailAlreadyUsed);
        }

        self.user_repo.create(user).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<User, UserError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, UserError> {
        self.user_repo
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(UserError::NotFound)
    }

    async fn email_already_used(&self, email: &str) -> Result<bool, UserError> {
        let user = self
            .user_repo
            .find_by_email(&email.trim().to_lowercase())
            .await?;
        Ok(user.is_some())
    }

    async fn find_role_id(&self, user: &User) -> Result<Option<Uuid>, UserError> {
        Ok(self.user_repo.find_role_id(user).await?)
    }

    fn validate_password(&self, hash: &str, plaintext: &str) -> Result<bool, UserError> {
        password::verify_password(plaintext, hash)
            .map_err(|e| UserError::Internal(format!("Invalid password hash: {}", e)))
    }
}
