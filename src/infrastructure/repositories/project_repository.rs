//! Project Repository Implementation
//!
//! PostgreSQL implementation of the ProjectRepository trait.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::{Project, ProjectRepository, RepositoryError};
use crate::infrastructure::database::map_db_error;

/// Database row representation of the `"Project"` table.
#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    project_id: Uuid,
    description: String,
    compensation: String,
    duration: String,
    recommendations: Vec<String>,
    ref_company: Uuid,
}

impl ProjectRow {
    fn into_project(self) -> Project {
        Project {
            id: self.project_id,
            description: self.description,
            compensation: self.compensation,
            duration: self.duration,
            recommendations: self.recommendations,
            company_id: self.ref_company,
        }
    }
}

/// PostgreSQL project repository implementation.
#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a project, or rewrite it when the id already exists.
    pub async fn upsert_tx(conn: &mut PgConnection, project: &Project) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO "Project" (project_id, description, compensation, duration, recommendations, ref_company)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (project_id) DO UPDATE
            SET description = EXCLUDED.description,
                compensation = EXCLUDED.compensation,
                duration = EXCLUDED.duration,
                recommendations = EXCLUDED.recommendations
            "#,
        )
        .bind(project.id)
        .bind(&project.description)
        .bind(&project.compensation)
        .bind(&project.duration)
        .bind(&project.recommendations)
        .bind(project.company_id)
        .execute(conn)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    pub async fn find_by_company_tx(
        conn: &mut PgConnection,
        company_id: Uuid,
    ) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT project_id, description, compensation, duration, recommendations, ref_company
            FROM "Project"
            WHERE ref_company = $1
            ORDER BY seq
            "#,
        )
        .bind(company_id)
        .fetch_all(conn)
        .await?;

        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn create(&self, project: &Project) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO "Project" (project_id, description, compensation, duration, recommendations, ref_company)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(project.id)
        .bind(&project.description)
        .bind(&project.compensation)
        .bind(&project.duration)
        .bind(&project.recommendations)
        .bind(project.company_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT project_id, description, compensation, duration, recommendations, ref_company
            FROM "Project"
            WHERE project_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProjectRow::into_project))
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT project_id, description, compensation, duration, recommendations, ref_company
            FROM "Project"
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }

    async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Project>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        Self::find_by_company_tx(&mut conn, company_id).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query(r#"DELETE FROM "Project" WHERE project_id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
