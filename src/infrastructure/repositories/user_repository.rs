//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the `"User"` table and the domain User entity. The `*_tx`
//! helpers are shared with the aggregate repositories that insert users as
//! part of a larger unit of work.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::{RepositoryError, Role, User, UserRepository};
use crate::infrastructure::database::map_db_error;

/// Column list matching [`UserRow`].
pub(crate) const USER_COLUMNS: &str =
    r#"u.user_id, u.email, u.hashed_password, u.first_name, u.last_name, u.role"#;

/// Database row representation of the `"User"` table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    user_id: Uuid,
    email: String,
    hashed_password: String,
    first_name: String,
    last_name: String,
    role: String,
}

impl UserRow {
    /// Convert database row to domain User entity.
    pub(crate) fn into_user(self) -> Result<User, RepositoryError> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            RepositoryError::Database(sqlx::Error::Decode(
                format!("unknown role '{}' for user {}", self.role, self.user_id).into(),
            ))
        })?;

        Ok(User {
            id: self.user_id,
            email: self.email,
            password_hash: self.hashed_password,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
        })
    }
}

#[cfg(test)]
impl UserRow {
    pub(crate) fn sample(role: Role) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email: "a@x.com".into(),
            hashed_password: "hash".into(),
            first_name: "ann".into(),
            last_name: "bos".into(),
            role: role.as_str().into(),
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user on an existing connection or transaction.
    pub async fn create_tx(conn: &mut PgConnection, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO "User" (user_id, email, hashed_password, first_name, last_name, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .execute(conn)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// Rewrite email and names of a user.
    pub async fn update_tx(conn: &mut PgConnection, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE "User"
            SET email = $2, first_name = $3, last_name = $4
            WHERE user_id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(conn)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    pub async fn find_by_id_tx(conn: &mut PgConnection, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "User" u WHERE u.user_id = $1"#
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        Self::create_tx(&mut conn, user).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        Self::find_by_id_tx(&mut conn, id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "User" u WHERE u.email = LOWER($1)"#
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_role_id(&self, user: &User) -> Result<Option<Uuid>, RepositoryError> {
        let query = match user.role {
            Role::Student => r#"SELECT student_id FROM "Student" WHERE ref_user = $1"#,
            Role::Representative => {
                r#"SELECT representative_id FROM "Representative" WHERE ref_user = $1"#
            }
        };

        let id = sqlx::query_scalar::<_, Uuid>(query)
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }
}
