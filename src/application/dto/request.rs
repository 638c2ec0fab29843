//! Request DTOs
//!
//! Data structures for API request bodies. Field names follow the public
//! JSON contract (`firstname`, `jobTitle`, ...).

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{
    AddressUpdate, CompanyUpdate, NewAccount, NewAddress, NewCompany, NewProject, NewRepresentative,
    NewStudent, ProjectUpdate, StudentUpdate,
};
use crate::domain::StudentStatus;

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account fields nested under `user`
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub firstname: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub lastname: String,
}

impl From<UserRequest> for NewAccount {
    fn from(req: UserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.firstname,
            last_name: req.lastname,
        }
    }
}

/// Student signup request
#[derive(Debug, Deserialize, Validate)]
pub struct StudentSignupRequest {
    #[validate(length(min = 1, message = "University is required"))]
    pub university: String,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default, alias = "experience")]
    pub experiences: Vec<String>,

    #[serde(default)]
    pub status: StudentStatus,

    #[validate(nested)]
    pub user: UserRequest,
}

impl From<StudentSignupRequest> for NewStudent {
    fn from(req: StudentSignupRequest) -> Self {
        Self {
            account: req.user.into(),
            university: req.university,
            skills: req.skills,
            experiences: req.experiences,
            status: req.status,
        }
    }
}

/// Partial student update; absent fields keep their value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub university: Option<String>,
    pub skills: Option<Vec<String>>,

    #[serde(alias = "experience")]
    pub experiences: Option<Vec<String>>,

    pub status: Option<StudentStatus>,
}

impl From<UpdateStudentRequest> for StudentUpdate {
    fn from(req: UpdateStudentRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.firstname,
            last_name: req.lastname,
            university: req.university,
            skills: req.skills,
            experiences: req.experiences,
            status: req.status,
        }
    }
}

/// Company location
#[derive(Debug, Deserialize, Validate)]
pub struct LocationRequest {
    /// Set when editing an existing address
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,

    /// Dutch postcode, e.g. "1234 AB"
    #[validate(length(min = 1, message = "Zipcode is required"))]
    pub zipcode: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "Number is required"))]
    pub number: String,
}

impl LocationRequest {
    fn into_address(self) -> NewAddress {
        NewAddress {
            street: self.street,
            zipcode: self.zipcode,
            city: self.city,
            number: self.number,
        }
    }
}

/// Representative signup, either with a company or through an invite link
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RepresentativeRequest {
    #[serde(rename = "jobTitle")]
    #[validate(length(min = 1, message = "Job title is required"))]
    pub job_title: String,

    #[validate(nested)]
    pub user: UserRequest,
}

impl From<RepresentativeRequest> for NewRepresentative {
    fn from(req: RepresentativeRequest) -> Self {
        Self {
            account: req.user.into(),
            job_title: req.job_title,
        }
    }
}

/// Company signup request
#[derive(Debug, Deserialize, Validate)]
pub struct CompanySignupRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Information is required"))]
    pub information: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    #[validate(nested)]
    pub locations: Vec<LocationRequest>,

    /// The main representative
    #[validate(length(equal = 1, message = "Exactly one representative is required"))]
    #[validate(nested)]
    pub representatives: Vec<RepresentativeRequest>,
}

impl From<CompanySignupRequest> for NewCompany {
    fn from(req: CompanySignupRequest) -> Self {
        Self {
            name: req.name,
            information: req.information,
            description: req.description,
            locations: req.locations.into_iter().map(LocationRequest::into_address).collect(),
            representatives: req.representatives.into_iter().map(Into::into).collect(),
        }
    }
}

/// Project listing
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Compensation is required"))]
    pub compensation: String,

    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration: String,

    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl From<ProjectRequest> for NewProject {
    fn from(req: ProjectRequest) -> Self {
        Self {
            description: req.description,
            compensation: req.compensation,
            duration: req.duration,
            recommendations: req.recommendations,
        }
    }
}

/// Existing project inside a company update
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectUpdateRequest {
    pub id: Uuid,

    #[serde(flatten)]
    #[validate(nested)]
    pub project: ProjectRequest,
}

/// Additive company update
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    pub information: Option<String>,
    pub description: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub locations: Vec<LocationRequest>,

    #[serde(default)]
    #[validate(nested)]
    pub projects: Vec<ProjectUpdateRequest>,
}

impl From<UpdateCompanyRequest> for CompanyUpdate {
    fn from(req: UpdateCompanyRequest) -> Self {
        Self {
            name: req.name,
            information: req.information,
            description: req.description,
            locations: req
                .locations
                .into_iter()
                .map(|l| AddressUpdate {
                    id: l.id,
                    address: l.into_address(),
                })
                .collect(),
            projects: req
                .projects
                .into_iter()
                .map(|p| ProjectUpdate {
                    id: p.id,
                    description: p.project.description,
                    compensation: p.project.compensation,
                    duration: p.project.duration,
                    recommendations: p.project.recommendations,
                })
                .collect(),
        }
    }
}
