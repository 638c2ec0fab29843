//! Database Module
//!
//! PostgreSQL connection pool, migrations, constraint mapping and transaction
//! management.

pub mod unit_of_work;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::domain::RepositoryError;

pub use unit_of_work::TransactionContext;

/// Unique constraint on `"User".email`
pub const USER_EMAIL_UNIQUE: &str = "user_email_unique";

/// Unique constraint on `"Company".name`
pub const COMPANY_NAME_UNIQUE: &str = "company_name_unique";

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Translate constraint violations into named repository conflicts.
pub fn map_db_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USER_EMAIL_UNIQUE) => return RepositoryError::EmailTaken,
                Some(COMPANY_NAME_UNIQUE) => return RepositoryError::CompanyNameTaken,
                _ => {}
            }
        }

        if db_err.is_foreign_key_violation() {
            let referenced = match db_err.constraint() {
                Some(c) if c.ends_with("company_fk") => "company",
                Some(c) if c.ends_with("representative_fk") => "representative",
                Some(c) if c.ends_with("user_fk") => "user",
                _ => "entity",
            };
            return RepositoryError::MissingReference(referenced);
        }
    }

    RepositoryError::Database(e)
}
