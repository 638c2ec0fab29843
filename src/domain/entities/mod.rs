//! # Domain Entities
//!
//! Core business objects of the matching platform. Each persisted entity maps
//! to a table and carries the repository trait the infrastructure layer
//! implements.
//!
//! ## Aggregates
//!
//! - **Company**: owns its addresses, projects and founding representative
//! - **Student**: owns its user
//! - **Representative**: owns its user, references its company
//!
//! ## Supporting Entities
//!
//! - **User**: login identity of a student or representative
//! - **InviteLink**: single-use, time-bounded representative onboarding link
//! - **Message**: validated only, never stored
//!
//! Constructors trim and lower-case free-text fields and reject blanks with a
//! [`ValidationError`].

mod company;
mod invite_link;
mod message;
mod project;
mod representative;
mod student;
mod user;

pub use company::{Address, Company, CompanyRepository};
pub use invite_link::{InviteLink, InviteLinkRepository, InviteStatus};
#[cfg(test)]
pub use invite_link::MockInviteLinkRepository;
pub use message::Message;
pub use project::{Project, ProjectRepository};
pub use representative::{Representative, RepresentativeRepository};
pub use student::{Student, StudentRepository};
pub use user::{User, UserRepository};

use crate::domain::errors::ValidationError;

/// Trimmed, lower-cased value of a required text field.
pub(crate) fn require(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(format!("provided {field} can't be empty")));
    }
    Ok(value.to_lowercase())
}
