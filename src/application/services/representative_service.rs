//! Representative Service
//!
//! Registration of additional representatives for an existing company.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::company_service::{CompanyDirectory, NewRepresentative};
use super::user_service::{UserError, UserService};
use crate::domain::{Representative, RepositoryError, RepresentativeRepository};

/// Representative service trait
#[async_trait]
pub trait RepresentativeService: Send + Sync {
    /// Create a representative bound to `company_id`
    async fn register(
        &self,
        company_id: Uuid,
        new_representative: NewRepresentative,
    ) -> Result<Representative, RepresentativeError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Representative, RepresentativeError>;
}

/// Representative service errors
#[derive(Debug, thiserror::Error)]
pub enum RepresentativeError {
    #[error("Representative not found")]
    NotFound,

    #[error("email is already in use and bound to an account")]
    EmailAlreadyUsed,

    #[error("company does not exist")]
    CompanyNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for RepresentativeError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::EmailTaken => RepresentativeError::EmailAlreadyUsed,
            RepositoryError::MissingReference("company") => RepresentativeError::CompanyNotFound,
            RepositoryError::NotFound => RepresentativeError::NotFound,
            other => RepresentativeError::Internal(other.to_string()),
        }
    }
}

impl From<UserError> for RepresentativeError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::EmailAlreadyUsed => RepresentativeError::EmailAlreadyUsed,
            UserError::Validation(msg) => RepresentativeError::Validation(msg),
            other => RepresentativeError::Internal(other.to_string()),
        }
    }
}

/// RepresentativeService implementation
pub struct RepresentativeServiceImpl<R>
where
    R: RepresentativeRepository,
{
    representative_repo: Arc<R>,
    companies: Arc<dyn CompanyDirectory>,
    users: Arc<dyn UserService>,
}

impl<R> RepresentativeServiceImpl<R>
where
    R: RepresentativeRepository,
{
    pub fn new(
        representative_repo: Arc<R>,
        companies: Arc<dyn CompanyDirectory>,
        users: Arc<dyn UserService>,
    ) -> Self {
        Self {
            representative_repo,
            companies,
            users,
        }
    }
}

#[async_trait]
impl<R> RepresentativeService for RepresentativeServiceImpl<R>
where
    R: RepresentativeRepository + 'static,
{
    async fn register(
        &self,
        company_id: Uuid,
        new_representative: NewRepresentative,
    ) -> Result<Representative, RepresentativeError> {
        let representative = new_representative.into_representative(company_id)?;

        if self.users.email_already_used(&representative.user.email).await? {
            return Err(RepresentativeError::EmailAlreadyUsed);
        }

        let company_exists = self
            .companies
            .exists(company_id)
            .await
            .map_err(|e| RepresentativeError::Internal(e.to_string()))?;
        if !company_exists {
            return Err(RepresentativeError::CompanyNotFound);
        }

        self.representative_repo.create(&representative).await?;

        tracing::info!(
            representative_id = %representative.id,
            %company_id,
            "Representative registered"
        );
        Ok(representative)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Representative, RepresentativeError> {
        self.representative_repo
            .find_by_id(id)
            .await?
            .ok_or(RepresentativeError::NotFound)
    }
}
