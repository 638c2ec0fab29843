//! Company Service
//!
//! Company signup (company plus founding representative as one aggregate),
//! lookups and additive profile edits.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::user_service::{NewAccount, UserError, UserService};
use crate::domain::{Address, Company, CompanyRepository, Project, RepositoryError, Representative, Role};
use crate::infrastructure::metrics;

/// Read-only company existence check.
///
/// Services that only need to know whether a company exists depend on this
/// instead of the full [`CompanyService`].
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn exists(&self, company_id: Uuid) -> Result<bool, CompanyError>;
}

/// Company service trait
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// Create a company together with its main representative
    async fn register(&self, new_company: NewCompany) -> Result<Company, CompanyError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Company, CompanyError>;

    async fn find_all(&self) -> Result<Vec<Company>, CompanyError>;

    async fn find_name_by_id(&self, id: Uuid) -> Result<String, CompanyError>;

    async fn name_already_used(&self, name: &str) -> Result<bool, CompanyError>;

    /// Apply an additive update on behalf of one of the company's
    /// representatives
    async fn edit(
        &self,
        company_id: Uuid,
        editor_id: Uuid,
        update: CompanyUpdate,
    ) -> Result<Company, CompanyError>;
}

/// Raw address fields.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub number: String,
}

impl NewAddress {
    fn into_address(self, id: Option<Uuid>) -> Result<Address, CompanyError> {
        match id {
            Some(id) => Address::with_id(id, &self.street, &self.zipcode, &self.city, &self.number),
            None => Address::new(&self.street, &self.zipcode, &self.city, &self.number),
        }
        .map_err(|e| CompanyError::Validation(e.to_string()))
    }
}

/// Account plus job title of a representative to create.
#[derive(Debug, Clone)]
pub struct NewRepresentative {
    pub account: NewAccount,
    pub job_title: String,
}

impl NewRepresentative {
    /// Hash the password and build a validated representative of `company_id`.
    pub fn into_representative(self, company_id: Uuid) -> Result<Representative, UserError> {
        let user = self.account.into_user(Role::Representative)?;
        Representative::new(&self.job_title, company_id, user).map_err(|e| UserError::Validation(e.to_string()))
    }
}

/// Company signup payload.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub information: String,
    pub description: String,
    pub locations: Vec<NewAddress>,

    /// Must hold exactly the main representative
    pub representatives: Vec<NewRepresentative>,
}

/// Additive company update. Absent fields and omitted addresses or projects
/// stay as they are.
#[derive(Debug, Clone, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub information: Option<String>,
    pub description: Option<String>,
    pub locations: Vec<AddressUpdate>,
    pub projects: Vec<ProjectUpdate>,
}

/// Address to replace (known `id`) or add.
#[derive(Debug, Clone)]
pub struct AddressUpdate {
    pub id: Option<Uuid>,
    pub address: NewAddress,
}

/// Replacement fields of an existing project.
#[derive(Debug, Clone)]
pub struct ProjectUpdate {
    pub id: Uuid,
    pub description: String,
    pub compensation: String,
    pub duration: String,
    pub recommendations: Vec<String>,
}

/// Company service errors
#[derive(Debug, thiserror::Error)]
pub enum CompanyError {
    #[error("Company not found")]
    NotFound,

    #[error("company name is already in use")]
    CompanyNameAlreadyUsed,

    #[error("email is already in use and bound to an account")]
    EmailAlreadyUsed,

    #[error("only representatives of this company may edit it")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for CompanyError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::EmailTaken => CompanyError::EmailAlreadyUsed,
            RepositoryError::CompanyNameTaken => CompanyError::CompanyNameAlreadyUsed,
            RepositoryError::NotFound => CompanyError::NotFound,
            other => CompanyError::Internal(other.to_string()),
        }
    }
}

impl From<UserError> for CompanyError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::EmailAlreadyUsed => CompanyError::EmailAlreadyUsed,
            UserError::Validation(msg) => CompanyError::Validation(msg),
            other => CompanyError::Internal(other.to_string()),
        }
    }
}

/// CompanyService implementation
pub struct CompanyServiceImpl<C>
where
    C: CompanyRepository,
{
    company_repo: Arc<C>,
    users: Arc<dyn UserService>,
}

impl<C> CompanyServiceImpl<C>
where
    C: CompanyRepository,
{
    pub fn new(company_repo: Arc<C>, users: Arc<dyn UserService>) -> Self {
        Self { company_repo, users }
    }
}

#[async_trait]
impl<C> CompanyDirectory for CompanyServiceImpl<C>
where
    C: CompanyRepository + 'static,
{
    async fn exists(&self, company_id: Uuid) -> Result<bool, CompanyError> {
        Ok(self.company_repo.exists(company_id).await?)
    }
}

#[async_trait]
impl<C> CompanyService for CompanyServiceImpl<C>
where
    C: CompanyRepository + 'static,
{
    async fn register(&self, new_company: NewCompany) -> Result<Company, CompanyError> {
        let NewCompany { name, information, description, locations, mut representatives } = new_company;

        if representatives.len() != 1 {
            return Err(CompanyError::Validation(
                "a company is created with exactly one main representative".into(),
            ));
        }

        let mut company = Company::new(&name, &information, &description)
            .map_err(|e| CompanyError::Validation(e.to_string()))?;
        for location in locations {
            company.locations.push(location.into_address(None)?);
        }

        if self.name_already_used(&company.name).await? {
            return Err(CompanyError::CompanyNameAlreadyUsed);
        }

        let main = representatives
            .pop()
            .ok_or_else(|| CompanyError::Validation("missing main representative".into()))?
            .into_representative(company.id)?;
        if self.users.email_already_used(&main.user.email).await? {
            return Err(CompanyError::EmailAlreadyUsed);
        }
        company.representatives.push(main);

        self.company_repo.create(&company).await?;

        metrics::record_signup("company");
        tracing::info!(company_id = %company.id, name = %company.name, "Company registered");
        Ok(company)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Company, CompanyError> {
        self.company_repo
            .find_by_id(id)
            .await?
            .ok_or(CompanyError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Company>, CompanyError> {
        Ok(self.company_repo.find_all().await?)
    }

    async fn find_name_by_id(&self, id: Uuid) -> Result<String, CompanyError> {
        Ok(self.find_by_id(id).await?.name)
    }

    async fn name_already_used(&self, name: &str) -> Result<bool, CompanyError> {
        let company = self
            .company_repo
            .find_by_name(&name.trim().to_lowercase())
            .await?;
        Ok(company.is_some())
    }

    async fn edit(
        &self,
        company_id: Uuid,
        editor_id: Uuid,
        update: CompanyUpdate,
    ) -> Result<Company, CompanyError> {
        let mut company = self.find_by_id(company_id).await?;

        if !company.has_representative(editor_id) {
            tracing::warn!(%company_id, %editor_id, "Edit attempt by non-representative");
            return Err(CompanyError::Forbidden);
        }

        let edited = Company::new(
            update.name.as_deref().unwrap_or(&company.name),
            update.information.as_deref().unwrap_or(&company.information),
            update.description.as_deref().unwrap_or(&company.description),
        )
        .map_err(|e| CompanyError::Validation(e.to_string()))?;

        if edited.name != company.name && self.name_already_used(&edited.name).await? {
            return Err(CompanyError::CompanyNameAlreadyUsed);
        }
        company.name = edited.name;
        company.information = edited.information;
        company.description = edited.description;

        for location in update.locations {
            // Ids of other companies' addresses are never reused
            let id = location.id.filter(|id| company.locations.iter().any(|a| a.id == *id));
            let address = location.address.into_address(id)?;
            company.upsert_location(address);
        }

        for change in update.projects {
            if !company.projects.iter().any(|p| p.id == change.id) {
                return Err(CompanyError::Validation(format!(
                    "project {} does not belong to this company",
                    change.id
                )));
            }
            let project = Project::new(
                &change.description,
                &change.compensation,
                &change.duration,
                change.recommendations,
                company.id,
            )
            .map_err(|e| CompanyError::Validation(e.to_string()))?;
            company.upsert_project(Project { id: change.id, ..project });
        }

        self.company_repo.update(&company).await?;

        tracing::info!(%company_id, %editor_id, "Company edited");
        Ok(company)
    }
}
