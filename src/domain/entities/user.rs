//! User entity and repository trait.
//!
//! Maps to the `"User"` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require;
use crate::domain::errors::{RepositoryError, ValidationError};
use crate::domain::value_objects::Role;

/// Login identity shared by students and representatives.
///
/// Maps to the `"User"` table:
/// - user_id: UUID PRIMARY KEY
/// - email: TEXT NOT NULL, constraint `user_email_unique`
/// - hashed_password: TEXT NOT NULL
/// - first_name, last_name: TEXT NOT NULL
/// - role: TEXT NOT NULL ('student' | 'representative')
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Lower-cased email address
    pub email: String,

    /// Argon2 PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl User {
    /// Build a user from raw fields.
    ///
    /// Email and names are trimmed and lower-cased. The password must already
    /// be hashed.
    pub fn new(
        email: &str,
        password_hash: String,
        first_name: &str,
        last_name: &str,
        role: Role,
    ) -> Result<Self, ValidationError> {
        let email = require("email", email)?;
        if !email.contains('@') {
            return Err(ValidationError::new("provided email is invalid"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name: require("firstname", first_name)?,
            last_name: require("lastname", last_name)?,
            role,
        })
    }
}

/// Repository trait for User data access operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a standalone user.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Find a user by (case-insensitive) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Resolve the id of the student or representative owning this user.
    async fn find_role_id(&self, user: &User) -> Result<Option<Uuid>, RepositoryError>;
}
