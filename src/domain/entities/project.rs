//! Project entity and repository trait.
//!
//! Maps to the `"Project"` table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require;
use crate::domain::errors::{RepositoryError, ValidationError};

/// A project for which a company is looking for students.
///
/// Compensation and duration are free text ("3-4 months", "negotiable").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub description: String,
    pub compensation: String,
    pub duration: String,
    pub recommendations: Vec<String>,
    pub company_id: Uuid,
}

impl Project {
    pub fn new(
        description: &str,
        compensation: &str,
        duration: &str,
        recommendations: Vec<String>,
        company_id: Uuid,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            description: require("description", description)?,
            compensation: require("compensation", compensation)?,
            duration: require("duration", duration)?,
            recommendations: recommendations
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            company_id,
        })
    }
}

/// Repository trait for Project data access operations.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: &Project) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError>;

    async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Project>, RepositoryError>;

    /// Delete a project. Unknown ids report `NotFound`.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_lowercases() {
        let project = Project::new("Build API", "Negotiable", "3-4 Months", vec!["Rust".into()], Uuid::nil()).unwrap();

        assert_eq!(project.description, "build api");
        assert_eq!(project.compensation, "negotiable");
        assert_eq!(project.duration, "3-4 months");
        assert_eq!(project.recommendations, vec!["Rust"]);
    }

    #[test]
    fn test_new_project_requires_fields() {
        assert!(Project::new("", "c", "d", vec![], Uuid::nil()).is_err());
        assert!(Project::new("d", "", "d", vec![], Uuid::nil()).is_err());
        assert!(Project::new("d", "c", " ", vec![], Uuid::nil()).is_err());
    }
}
