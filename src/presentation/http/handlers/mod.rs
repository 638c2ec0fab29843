//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod company;
pub mod health;
pub mod project;
pub mod representative;
pub mod student;
