//! Invite Link Repository Implementation
//!
//! PostgreSQL implementation of the InviteLinkRepository trait.
//! Redemption locks the link row so concurrent redemptions serialize and at
//! most one of them commits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::PgRepresentativeRepository;
use crate::domain::{InviteLink, InviteLinkRepository, Representative, RepositoryError};
use crate::infrastructure::database::{map_db_error, TransactionContext};

/// Database row representation of the `"Invite_Link"` table.
#[derive(Debug, sqlx::FromRow)]
struct InviteLinkRow {
    invite_link_id: Uuid,
    url: String,
    created_at: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
    used: bool,
    ref_representative: Uuid,
    ref_company: Uuid,
}

impl InviteLinkRow {
    fn into_invite_link(self) -> InviteLink {
        InviteLink {
            id: self.invite_link_id,
            url: self.url,
            created_at: self.created_at,
            expiry_date: self.expiry_date,
            used: self.used,
            created_by: self.ref_representative,
            company_id: self.ref_company,
        }
    }
}

/// PostgreSQL invite link repository implementation.
#[derive(Clone)]
pub struct PgInviteLinkRepository {
    pool: PgPool,
}

impl PgInviteLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteLinkRepository for PgInviteLinkRepository {
    async fn create(&self, link: &InviteLink) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO "Invite_Link"
                (invite_link_id, url, created_at, expiry_date, used, ref_representative, ref_company)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(link.id)
        .bind(&link.url)
        .bind(link.created_at)
        .bind(link.expiry_date)
        .bind(link.used)
        .bind(link.created_by)
        .bind(link.company_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<InviteLink>, RepositoryError> {
        let row = sqlx::query_as::<_, InviteLinkRow>(
            r#"
            SELECT invite_link_id, url, created_at, expiry_date, used, ref_representative, ref_company
            FROM "Invite_Link"
            WHERE invite_link_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InviteLinkRow::into_invite_link))
    }

    async fn find_by_creator(&self, representative_id: Uuid) -> Result<Vec<InviteLink>, RepositoryError> {
        let rows = sqlx::query_as::<_, InviteLinkRow>(
            r#"
            SELECT invite_link_id, url, created_at, expiry_date, used, ref_representative, ref_company
            FROM "Invite_Link"
            WHERE ref_representative = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(representative_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InviteLinkRow::into_invite_link).collect())
    }

    async fn redeem(
        &self,
        invite_id: Uuid,
        representative: &Representative,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut tx = TransactionContext::begin(&self.pool).await?;

        // Lock the link for the rest of the transaction
        let link = sqlx::query_as::<_, InviteLinkRow>(
            r#"
            SELECT invite_link_id, url, created_at, expiry_date, used, ref_representative, ref_company
            FROM "Invite_Link"
            WHERE invite_link_id = $1
            FOR UPDATE
            "#,
        )
        .bind(invite_id)
        .fetch_optional(tx.conn())
        .await?
        .map(InviteLinkRow::into_invite_link)
        .ok_or(RepositoryError::NotFound)?;

        if link.has_expired(now) {
            return Err(RepositoryError::InviteExpired);
        }
        if link.used {
            return Err(RepositoryError::InviteAlreadyUsed);
        }

        PgRepresentativeRepository::create_tx(tx.conn(), representative).await?;

        let result = sqlx::query(
            r#"UPDATE "Invite_Link" SET used = TRUE WHERE invite_link_id = $1 AND used = FALSE"#,
        )
        .bind(invite_id)
        .execute(tx.conn())
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::InviteAlreadyUsed);
        }

        tx.commit().await
    }
}
