//! Unit of Work Implementation
//!
//! Provides transactional boundaries for multi-table repository writes.
//! Dropping a context without committing rolls the transaction back.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use super::map_db_error;
use crate::domain::RepositoryError;

/// Transaction context that wraps a SQLx transaction.
pub struct TransactionContext {
    tx: Transaction<'static, Postgres>,
}

impl TransactionContext {
    /// Begin a new transaction on the pool.
    pub async fn begin(pool: &PgPool) -> Result<Self, RepositoryError> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }

    /// Connection to run statements on inside this transaction.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    /// Commit the transaction. Deferred constraint failures are mapped like
    /// statement failures.
    pub async fn commit(self) -> Result<(), RepositoryError> {
        self.tx.commit().await.map_err(map_db_error)
    }
}
