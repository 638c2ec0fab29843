//! Project Service
//!
//! Project listings published by company representatives.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Project, ProjectRepository, Representative, RepositoryError, RepresentativeRepository};

/// Project service trait
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Project>, ProjectError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Project, ProjectError>;

    async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Project>, ProjectError>;

    /// Publish a project for the representative's company
    async fn add_project(&self, representative_id: Uuid, new_project: NewProject) -> Result<Project, ProjectError>;

    async fn delete(&self, project_id: Uuid, representative_id: Uuid) -> Result<(), ProjectError>;
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub description: String,
    pub compensation: String,
    pub duration: String,
    pub recommendations: Vec<String>,
}

/// Project service errors
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Project not found")]
    NotFound,

    #[error("Representative not found")]
    RepresentativeNotFound,

    #[error("only representatives of the owning company may change this project")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ProjectError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ProjectError::NotFound,
            other => ProjectError::Internal(other.to_string()),
        }
    }
}

/// ProjectService implementation
pub struct ProjectServiceImpl<P, R>
where
    P: ProjectRepository,
    R: RepresentativeRepository,
{
    project_repo: Arc<P>,
    representative_repo: Arc<R>,
}

impl<P, R> ProjectServiceImpl<P, R>
where
    P: ProjectRepository,
    R: RepresentativeRepository,
{
    pub fn new(project_repo: Arc<P>, representative_repo: Arc<R>) -> Self {
        Self {
            project_repo,
            representative_repo,
        }
    }

    async fn representative(&self, id: Uuid) -> Result<Representative, ProjectError> {
        self.representative_repo
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::RepresentativeNotFound)
    }
}

#[async_trait]
impl<P, R> ProjectService for ProjectServiceImpl<P, R>
where
    P: ProjectRepository + 'static,
    R: RepresentativeRepository + 'static,
{
    async fn fetch_all(&self) -> Result<Vec<Project>, ProjectError> {
        Ok(self.project_repo.find_all().await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Project, ProjectError> {
        self.project_repo
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound)
    }

    async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Project>, ProjectError> {
        Ok(self.project_repo.find_by_company(company_id).await?)
    }

    async fn add_project(&self, representative_id: Uuid, new_project: NewProject) -> Result<Project, ProjectError> {
        let representative = self.representative(representative_id).await?;

        let project = representative
            .create_project(
                &new_project.description,
                &new_project.compensation,
                &new_project.duration,
                new_project.recommendations,
            )
            .map_err(|e| ProjectError::Validation(e.to_string()))?;

        self.project_repo.create(&project).await?;

        tracing::info!(
            project_id = %project.id,
            company_id = %project.company_id,
            "Project published"
        );
        Ok(project)
    }

    async fn delete(&self, project_id: Uuid, representative_id: Uuid) -> Result<(), ProjectError> {
        let project = self.find_by_id(project_id).await?;
        let representative = self.representative(representative_id).await?;

        if representative.company_id != project.company_id {
            tracing::warn!(%project_id, %representative_id, "Project delete by foreign representative");
            return Err(ProjectError::Forbidden);
        }

        self.project_repo.delete(project_id).await?;

        tracing::info!(%project_id, "Project deleted");
        Ok(())
    }
}
