//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::SessionToken;
use crate::domain::{
    Address, Company, InviteLink, InviteStatus, Project, Representative, Role, Student, StudentStatus, User,
};

/// Id of a created or updated resource
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: Uuid,
}

impl IdResponse {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Company name lookup
#[derive(Debug, Serialize)]
pub struct NameResponse {
    pub name: String,
}

/// Session token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionToken> for TokenResponse {
    fn from(session: SessionToken) -> Self {
        Self {
            token: session.token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            expires_at: session.expires_at,
        }
    }
}

/// User response; never carries the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            firstname: user.first_name,
            lastname: user.last_name,
            role: user.role,
        }
    }
}

/// Student response
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: Uuid,
    pub university: String,
    pub skills: Vec<String>,
    pub experiences: Vec<String>,
    pub status: StudentStatus,
    pub resume: Option<String>,
    pub user: UserResponse,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            university: student.university,
            skills: student.skills,
            experiences: student.experiences,
            status: student.status,
            resume: student.resume,
            user: student.user.into(),
        }
    }
}

/// Representative response
#[derive(Debug, Serialize)]
pub struct RepresentativeResponse {
    pub id: Uuid,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    #[serde(rename = "companyID")]
    pub company_id: Uuid,
    pub user: UserResponse,
}

impl From<Representative> for RepresentativeResponse {
    fn from(representative: Representative) -> Self {
        Self {
            id: representative.id,
            job_title: representative.job_title,
            company_id: representative.company_id,
            user: representative.user.into(),
        }
    }
}

/// Company location response
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: Uuid,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub number: String,
}

impl From<Address> for LocationResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            zipcode: address.zipcode,
            city: address.city,
            number: address.number,
        }
    }
}

/// Project response
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub description: String,
    pub compensation: String,
    pub duration: String,
    pub recommendations: Vec<String>,
    #[serde(rename = "companyID")]
    pub company_id: Uuid,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            description: project.description,
            compensation: project.compensation,
            duration: project.duration,
            recommendations: project.recommendations,
            company_id: project.company_id,
        }
    }
}

/// Company aggregate response
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub information: String,
    pub description: String,
    pub locations: Vec<LocationResponse>,
    pub representatives: Vec<RepresentativeResponse>,
    pub projects: Vec<ProjectResponse>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            information: company.information,
            description: company.description,
            locations: company.locations.into_iter().map(Into::into).collect(),
            representatives: company.representatives.into_iter().map(Into::into).collect(),
            projects: company.projects.into_iter().map(Into::into).collect(),
        }
    }
}

/// Invite link response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteLinkResponse {
    pub id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub used: bool,
    pub created_by: Uuid,
    #[serde(rename = "companyID")]
    pub company_id: Uuid,
    pub status: InviteStatus,
}

impl InviteLinkResponse {
    /// Snapshot of `link` with its status evaluated at `now`.
    pub fn at(link: InviteLink, now: DateTime<Utc>) -> Self {
        Self {
            status: link.status(now),
            id: link.id,
            url: link.url,
            created_at: link.created_at,
            expiry_date: link.expiry_date,
            used: link.used,
            created_by: link.created_by,
            company_id: link.company_id,
        }
    }
}
