//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! Aggregate writes (company, student, representative, invite redemption)
//! run inside one [`TransactionContext`](crate::infrastructure::database::TransactionContext)
//! and reuse the row-level `*_tx` helpers of the repositories they compose.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgCompanyRepository, PgUserRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let company_repo = PgCompanyRepository::new(pool.clone());
//! }
//! ```

pub mod company_repository;
pub mod invite_link_repository;
pub mod project_repository;
pub mod representative_repository;
pub mod student_repository;
pub mod user_repository;

pub use company_repository::PgCompanyRepository;
pub use invite_link_repository::PgInviteLinkRepository;
pub use project_repository::PgProjectRepository;
pub use representative_repository::PgRepresentativeRepository;
pub use student_repository::PgStudentRepository;
pub use user_repository::PgUserRepository;
