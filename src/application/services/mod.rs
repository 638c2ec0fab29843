//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Sign-in and JWT session tokens
//! - **UserService**: Email uniqueness and password checks
//! - **StudentService**: Student accounts and resumes
//! - **CompanyService**: Company aggregates and their edits
//! - **RepresentativeService**: Representatives of existing companies
//! - **ProjectService**: Project listings
//! - **InviteService**: Representative invite links

pub mod auth_service;
pub mod company_service;
pub mod invite_service;
pub mod project_service;
pub mod representative_service;
pub mod student_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, Claims, SessionToken};

pub use company_service::{
    AddressUpdate, CompanyDirectory, CompanyError, CompanyService, CompanyServiceImpl, CompanyUpdate,
    NewAddress, NewCompany, NewRepresentative, ProjectUpdate,
};

pub use invite_service::{InviteError, InviteService, InviteServiceImpl};

pub use project_service::{NewProject, ProjectError, ProjectService, ProjectServiceImpl};

pub use representative_service::{RepresentativeError, RepresentativeService, RepresentativeServiceImpl};

pub use student_service::{NewStudent, StudentError, StudentService, StudentServiceImpl, StudentUpdate};

pub use user_service::{NewAccount, UserError, UserService, UserServiceImpl};
