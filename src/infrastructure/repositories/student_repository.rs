//! Student Repository Implementation
//!
//! PostgreSQL implementation of the StudentRepository trait.
//! Student and user rows are always written in the same transaction.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::user_repository::{PgUserRepository, UserRow, USER_COLUMNS};
use crate::domain::{RepositoryError, Student, StudentRepository, StudentStatus};
use crate::infrastructure::database::{map_db_error, TransactionContext};

/// `"Student"` row joined with its `"User"` row.
#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    student_id: Uuid,
    university: String,
    skills: Vec<String>,
    experiences: Vec<String>,
    status: String,
    resume: Option<String>,
    #[sqlx(flatten)]
    user: UserRow,
}

impl StudentRow {
    fn into_student(self) -> Result<Student, RepositoryError> {
        let status = StudentStatus::parse(&self.status).ok_or_else(|| {
            RepositoryError::Database(sqlx::Error::Decode(
                format!("unknown status '{}' for student {}", self.status, self.student_id).into(),
            ))
        })?;

        Ok(Student {
            id: self.student_id,
            university: self.university,
            skills: self.skills,
            experiences: self.experiences,
            status,
            resume: self.resume,
            user: self.user.into_user()?,
        })
    }
}

/// PostgreSQL student repository implementation.
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select(filter: &str) -> String {
        format!(
            r#"
            SELECT s.student_id, s.university, s.skills, s.experiences, s.status, s.resume,
                   {USER_COLUMNS}
            FROM "Student" s
            INNER JOIN "User" u ON u.user_id = s.ref_user
            {filter}
            "#
        )
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn create(&self, student: &Student) -> Result<(), RepositoryError> {
        let mut tx = TransactionContext::begin(&self.pool).await?;

        PgUserRepository::create_tx(tx.conn(), &student.user).await?;

        sqlx::query(
            r#"
            INSERT INTO "Student" (student_id, university, skills, experiences, status, resume, ref_user)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(student.id)
        .bind(&student.university)
        .bind(&student.skills)
        .bind(&student.experiences)
        .bind(student.status.as_str())
        .bind(&student.resume)
        .bind(student.user.id)
        .execute(tx.conn())
        .await
        .map_err(map_db_error)?;

        tx.commit().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, RepositoryError> {
        let row = sqlx::query_as::<_, StudentRow>(&Self::select("WHERE s.student_id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(StudentRow::into_student).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Student>, RepositoryError> {
        let rows = sqlx::query_as::<_, StudentRow>(&Self::select("ORDER BY u.last_name, u.first_name"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(StudentRow::into_student).collect()
    }

    async fn update(&self, student: &Student) -> Result<(), RepositoryError> {
        let mut tx = TransactionContext::begin(&self.pool).await?;

        let result = sqlx::query(
            r#"
            UPDATE "Student"
            SET university = $2, skills = $3, experiences = $4, status = $5, resume = $6
            WHERE student_id = $1
            "#,
        )
        .bind(student.id)
        .bind(&student.university)
        .bind(&student.skills)
        .bind(&student.experiences)
        .bind(student.status.as_str())
        .bind(&student.resume)
        .execute(tx.conn())
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        PgUserRepository::update_tx(tx.conn(), &student.user).await?;

        tx.commit().await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // The student row cascades from its user
        let result = sqlx::query(
            r#"
            DELETE FROM "User"
            WHERE user_id = (SELECT ref_user FROM "Student" WHERE student_id = $1)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
