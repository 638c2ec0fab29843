//! Representative Repository Implementation
//!
//! PostgreSQL implementation of the RepresentativeRepository trait.
//! A representative row is always written together with its user row.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::user_repository::{PgUserRepository, UserRow, USER_COLUMNS};
use crate::domain::{Representative, RepositoryError, RepresentativeRepository};
use crate::infrastructure::database::{map_db_error, TransactionContext};

/// `"Representative"` row joined with its `"User"` row.
#[derive(Debug, sqlx::FromRow)]
struct RepresentativeRow {
    representative_id: Uuid,
    job_title: String,
    ref_company: Uuid,
    #[sqlx(flatten)]
    user: UserRow,
}

impl RepresentativeRow {
    fn into_representative(self) -> Result<Representative, RepositoryError> {
        Ok(Representative {
            id: self.representative_id,
            job_title: self.job_title,
            company_id: self.ref_company,
            user: self.user.into_user()?,
        })
    }
}

/// PostgreSQL representative repository implementation.
#[derive(Clone)]
pub struct PgRepresentativeRepository {
    pool: PgPool,
}

impl PgRepresentativeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the user row and then the representative row.
    ///
    /// Callers own the transaction; nothing is committed here.
    pub async fn create_tx(
        conn: &mut PgConnection,
        representative: &Representative,
    ) -> Result<(), RepositoryError> {
        PgUserRepository::create_tx(&mut *conn, &representative.user).await?;

        sqlx::query(
            r#"
            INSERT INTO "Representative" (representative_id, job_title, ref_user, ref_company)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(representative.id)
        .bind(&representative.job_title)
        .bind(representative.user.id)
        .bind(representative.company_id)
        .execute(conn)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// All representatives of a company, users included.
    pub async fn find_by_company_tx(
        conn: &mut PgConnection,
        company_id: Uuid,
    ) -> Result<Vec<Representative>, RepositoryError> {
        let rows = sqlx::query_as::<_, RepresentativeRow>(&format!(
            r#"
            SELECT r.representative_id, r.job_title, r.ref_company, {USER_COLUMNS}
            FROM "Representative" r
            INNER JOIN "User" u ON u.user_id = r.ref_user
            WHERE r.ref_company = $1
            ORDER BY u.last_name, u.first_name
            "#
        ))
        .bind(company_id)
        .fetch_all(conn)
        .await?;

        rows.into_iter().map(RepresentativeRow::into_representative).collect()
    }
}

#[async_trait]
impl RepresentativeRepository for PgRepresentativeRepository {
    async fn create(&self, representative: &Representative) -> Result<(), RepositoryError> {
        let mut tx = TransactionContext::begin(&self.pool).await?;
        Self::create_tx(tx.conn(), representative).await?;
        tx.commit().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Representative>, RepositoryError> {
        let row = sqlx::query_as::<_, RepresentativeRow>(&format!(
            r#"
            SELECT r.representative_id, r.job_title, r.ref_company, {USER_COLUMNS}
            FROM "Representative" r
            INNER JOIN "User" u ON u.user_id = r.ref_user
            WHERE r.representative_id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RepresentativeRow::into_representative).transpose()
    }
}
