//! Representative entity and repository trait.
//!
//! Maps to the `"Representative"` table; each representative owns one
//! `"User"` row and references the company it acts for.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require, InviteLink, Project, User};
use crate::domain::errors::{RepositoryError, ValidationError};
use crate::domain::value_objects::Role;

/// An employee acting on behalf of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representative {
    pub id: Uuid,
    pub job_title: String,
    pub user: User,
    pub company_id: Uuid,
}

impl Representative {
    pub fn new(job_title: &str, company_id: Uuid, user: User) -> Result<Self, ValidationError> {
        if user.role != Role::Representative {
            return Err(ValidationError::new(
                "representative account requires the representative role",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            job_title: require("job title", job_title)?,
            user,
            company_id,
        })
    }

    /// Issue an invite link for a new representative of this company.
    ///
    /// `url_template` must contain the `<[companyID]>` and `<[inviteID]>`
    /// placeholders; both are substituted.
    pub fn generate_invite_link(
        &self,
        invite_id: Uuid,
        url_template: &str,
        valid_for: Duration,
        now: DateTime<Utc>,
    ) -> Result<InviteLink, ValidationError> {
        if url_template.trim().is_empty() {
            return Err(ValidationError::new("provided url can't be empty"));
        }

        let url = url_template
            .replace(InviteLink::COMPANY_ID_PLACEHOLDER, &self.company_id.to_string())
            .replace(InviteLink::INVITE_ID_PLACEHOLDER, &invite_id.to_string());

        Ok(InviteLink {
            id: invite_id,
            url,
            created_at: now,
            expiry_date: now + valid_for,
            used: false,
            created_by: self.id,
            company_id: self.company_id,
        })
    }

    /// Create a project listing for this representative's company.
    pub fn create_project(
        &self,
        description: &str,
        compensation: &str,
        duration: &str,
        recommendations: Vec<String>,
    ) -> Result<Project, ValidationError> {
        Project::new(description, compensation, duration, recommendations, self.company_id)
    }
}

/// Repository trait for Representative data access operations.
#[async_trait]
pub trait RepresentativeRepository: Send + Sync {
    /// Insert the user and representative rows in one unit of work.
    async fn create(&self, representative: &Representative) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Representative>, RepositoryError>;
}
