//! # Value Objects
//!
//! Small immutable types shared by several entities.

mod role;
mod status;

pub use role::Role;
pub use status::StudentStatus;
