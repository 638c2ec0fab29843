//! Company aggregate, its addresses, and the repository trait.
//!
//! Maps to the `"Company"` and `"Address"` tables. A company strictly owns its
//! addresses and projects, and the founding representative is persisted in the
//! same unit of work as the company row.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require, Project, Representative};
use crate::domain::errors::{RepositoryError, ValidationError};

/// Dutch postal code, e.g. "1234 AB".
static ZIPCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}\s[A-Z]{2}$").expect("valid regex"));

/// A company looking for skilled students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,

    /// Unique, lower-cased
    pub name: String,

    pub information: String,
    pub description: String,

    /// Branch locations in insertion order
    pub locations: Vec<Address>,

    pub representatives: Vec<Representative>,
    pub projects: Vec<Project>,
}

impl Company {
    /// Build an empty company. Locations and the main representative are
    /// attached by the caller before persisting.
    pub fn new(name: &str, information: &str, description: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: require("name", name)?,
            information: require("information", information)?,
            description: require("description", description)?,
            locations: Vec::new(),
            representatives: Vec::new(),
            projects: Vec::new(),
        })
    }

    /// Whether the given representative works for this company.
    pub fn has_representative(&self, representative_id: Uuid) -> bool {
        self.representatives.iter().any(|r| r.id == representative_id)
    }

    /// Replace the address with the same id, or append it when unknown.
    pub fn upsert_location(&mut self, address: Address) {
        match self.locations.iter_mut().find(|a| a.id == address.id) {
            Some(existing) => *existing = address,
            None => self.locations.push(address),
        }
    }

    /// Replace the project with the same id, or append it when unknown.
    pub fn upsert_project(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
    }
}

/// A branch address of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: Uuid,
    pub street: String,

    /// Kept verbatim, format `NNNN XX`
    pub zipcode: String,

    pub city: String,
    pub number: String,
}

impl Address {
    pub fn new(street: &str, zipcode: &str, city: &str, number: &str) -> Result<Self, ValidationError> {
        let street = require("street", street)?;

        if !ZIPCODE.is_match(zipcode) {
            return Err(ValidationError::new(
                "provided zipcode is invalid, should be of format 0000 XX, \
                 where 0 can be any number and X can be any uppercase letter",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            street,
            zipcode: zipcode.to_string(),
            city: require("city", city)?,
            number: require("number", number)?,
        })
    }

    /// Same as [`Address::new`] but keeps a caller supplied id.
    pub fn with_id(
        id: Uuid,
        street: &str,
        zipcode: &str,
        city: &str,
        number: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self { id, ..Self::new(street, zipcode, city, number)? })
    }
}

/// Repository trait for Company aggregates.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert the company, its addresses, and its representatives (users
    /// included) atomically.
    async fn create(&self, company: &Company) -> Result<(), RepositoryError>;

    /// Load the full aggregate.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, RepositoryError>;

    /// Load the full aggregate by (case-insensitive) name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError>;

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Rewrite scalar fields and upsert every address and project of the
    /// aggregate. Rows missing from `company` are left untouched.
    async fn update(&self, company: &Company) -> Result<(), RepositoryError>;
}
