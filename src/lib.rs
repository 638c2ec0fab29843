//! # cscoupler
//!
//! Backend that couples students looking for internship projects with the
//! companies offering them:
//! - Student, company and representative accounts with JWT sessions
//! - Company aggregates (locations, representatives, projects)
//! - Single-use, time-bounded invite links for onboarding representatives
//! - PostgreSQL or in-memory storage behind the same repository traits
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, in-memory store, storage and metrics
//! - **Presentation Layer**: HTTP routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! cscoupler/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, memory and file storage implementations
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, passwords, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
