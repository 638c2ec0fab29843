//! # Domain Layer
//!
//! Business objects of the student/company matching platform, independent of
//! HTTP and storage.
//!
//! - **entities**: validated constructors plus repository traits
//! - **value_objects**: closed enums shared by entities (Role, StudentStatus)
//! - **errors**: validation and repository error contracts

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::{RepositoryError, ValidationError};
pub use value_objects::*;
