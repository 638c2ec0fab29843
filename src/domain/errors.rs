//! Domain error types.
//!
//! `ValidationError` is produced by the pure entity constructors.
//! `RepositoryError` is the contract every repository implementation
//! (PostgreSQL or in-memory) reports failures through, so services can
//! translate storage-level conflicts into named business conditions.

/// A required field was empty or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Repository failure.
///
/// Unique and foreign-key violations are surfaced as dedicated variants
/// regardless of backend; everything else is an opaque persistence fault.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("email is already in use and bound to an account")]
    EmailTaken,

    #[error("company name is already in use")]
    CompanyNameTaken,

    #[error("entity not found")]
    NotFound,

    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error("invite link has expired")]
    InviteExpired,

    #[error("invite link has already been used")]
    InviteAlreadyUsed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
