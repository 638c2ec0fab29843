//! Company Repository Implementation
//!
//! PostgreSQL implementation of the CompanyRepository trait. The company row,
//! its addresses, its projects and its representatives are read and written
//! inside one transaction so callers only ever observe whole aggregates.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::{PgProjectRepository, PgRepresentativeRepository};
use crate::domain::{Address, Company, CompanyRepository, RepositoryError};
use crate::infrastructure::database::{map_db_error, TransactionContext};

/// Database row representation of the `"Company"` table.
#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    company_id: Uuid,
    name: String,
    information: String,
    description: String,
}

/// Database row representation of the `"Address"` table.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    address_id: Uuid,
    street: String,
    zipcode: String,
    city: String,
    number: String,
}

impl AddressRow {
    fn into_address(self) -> Address {
        Address {
            id: self.address_id,
            street: self.street,
            zipcode: self.zipcode,
            city: self.city,
            number: self.number,
        }
    }
}

/// PostgreSQL company repository implementation.
#[derive(Clone)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn upsert_address_tx(
        conn: &mut PgConnection,
        company_id: Uuid,
        address: &Address,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO "Address" (address_id, street, zipcode, city, number, ref_company)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (address_id) DO UPDATE
            SET street = EXCLUDED.street,
                zipcode = EXCLUDED.zipcode,
                city = EXCLUDED.city,
                number = EXCLUDED.number
            WHERE "Address".ref_company = EXCLUDED.ref_company
            "#,
        )
        .bind(address.id)
        .bind(&address.street)
        .bind(&address.zipcode)
        .bind(&address.city)
        .bind(&address.number)
        .bind(company_id)
        .execute(conn)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    /// Assemble the aggregate for an already fetched company row.
    async fn load_aggregate_tx(
        conn: &mut PgConnection,
        row: CompanyRow,
    ) -> Result<Company, RepositoryError> {
        let locations = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT address_id, street, zipcode, city, number
            FROM "Address"
            WHERE ref_company = $1
            ORDER BY seq
            "#,
        )
        .bind(row.company_id)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(AddressRow::into_address)
        .collect();

        let projects = PgProjectRepository::find_by_company_tx(&mut *conn, row.company_id).await?;
        let representatives =
            PgRepresentativeRepository::find_by_company_tx(&mut *conn, row.company_id).await?;

        Ok(Company {
            id: row.company_id,
            name: row.name,
            information: row.information,
            description: row.description,
            locations,
            representatives,
            projects,
        })
    }

    async fn find_one(&self, lookup: Lookup<'_>) -> Result<Option<Company>, RepositoryError> {
        let mut tx = TransactionContext::begin(&self.pool).await?;

        let row = match lookup {
            Lookup::Id(id) => {
                sqlx::query_as::<_, CompanyRow>(
                    r#"SELECT company_id, name, information, description FROM "Company" WHERE company_id = $1"#,
                )
                .bind(id)
                .fetch_optional(tx.conn())
                .await?
            }
            Lookup::Name(name) => {
                sqlx::query_as::<_, CompanyRow>(
                    r#"SELECT company_id, name, information, description FROM "Company" WHERE name = LOWER($1)"#,
                )
                .bind(name)
                .fetch_optional(tx.conn())
                .await?
            }
        };

        let company = match row {
            Some(row) => Some(Self::load_aggregate_tx(tx.conn(), row).await?),
            None => None,
        };

        tx.commit().await?;
        Ok(company)
    }
}

enum Lookup<'a> {
    Id(Uuid),
    Name(&'a str),
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn create(&self, company: &Company) -> Result<(), RepositoryError> {
        let mut tx = TransactionContext::begin(&self.pool).await?;

        sqlx::query(
            r#"
            INSERT INTO "Company" (company_id, name, information, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.information)
        .bind(&company.description)
        .execute(tx.conn())
        .await
        .map_err(map_db_error)?;

        for address in &company.locations {
            Self::upsert_address_tx(tx.conn(), company.id, address).await?;
        }

        for representative in &company.representatives {
            PgRepresentativeRepository::create_tx(tx.conn(), representative).await?;
        }

        for project in &company.projects {
            PgProjectRepository::upsert_tx(tx.conn(), project).await?;
        }

        tx.commit().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, RepositoryError> {
        self.find_one(Lookup::Id(id)).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError> {
        self.find_one(Lookup::Name(name.trim())).await
    }

    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError> {
        let mut tx = TransactionContext::begin(&self.pool).await?;

        let rows = sqlx::query_as::<_, CompanyRow>(
            r#"SELECT company_id, name, information, description FROM "Company" ORDER BY name"#,
        )
        .fetch_all(tx.conn())
        .await?;

        let mut companies = Vec::with_capacity(rows.len());
        for row in rows {
            companies.push(Self::load_aggregate_tx(tx.conn(), row).await?);
        }

        tx.commit().await?;
        Ok(companies)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM "Company" WHERE company_id = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, company: &Company) -> Result<(), RepositoryError> {
        let mut tx = TransactionContext::begin(&self.pool).await?;

        let result = sqlx::query(
            r#"
            UPDATE "Company"
            SET name = $2, information = $3, description = $4
            WHERE company_id = $1
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.information)
        .bind(&company.description)
        .execute(tx.conn())
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        for address in &company.locations {
            Self::upsert_address_tx(tx.conn(), company.id, address).await?;
        }

        for project in &company.projects {
            PgProjectRepository::upsert_tx(tx.conn(), project).await?;
        }

        tx.commit().await
    }
}
