//! Representative invite link entity and repository trait.
//!
//! Maps to the `"Invite_Link"` table. A link is single use and time bounded:
//!
//! ```text
//! ACTIVE --redeem--> USED      (stored flag)
//! ACTIVE --time----> EXPIRED   (computed from expiry_date)
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Representative;
use crate::domain::errors::RepositoryError;

/// Lifecycle state of an invite link at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Active,
    Used,
    Expired,
}

/// Invite link granting the right to sign up as a representative of
/// `company_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteLink {
    pub id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub used: bool,

    /// Representative who issued the link
    pub created_by: Uuid,

    /// Company the invitee joins
    pub company_id: Uuid,
}

impl InviteLink {
    pub const COMPANY_ID_PLACEHOLDER: &'static str = "<[companyID]>";
    pub const INVITE_ID_PLACEHOLDER: &'static str = "<[inviteID]>";

    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_date
    }

    /// Expiry wins over the used flag.
    pub fn status(&self, now: DateTime<Utc>) -> InviteStatus {
        if self.has_expired(now) {
            InviteStatus::Expired
        } else if self.used {
            InviteStatus::Used
        } else {
            InviteStatus::Active
        }
    }
}

/// Repository trait for InviteLink data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteLinkRepository: Send + Sync {
    async fn create(&self, link: &InviteLink) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<InviteLink>, RepositoryError>;

    /// All links issued by a representative.
    async fn find_by_creator(&self, representative_id: Uuid) -> Result<Vec<InviteLink>, RepositoryError>;

    /// Atomically persist `representative` (and its user) and mark the link
    /// used.
    ///
    /// The link is re-read under a lock; `InviteExpired` or
    /// `InviteAlreadyUsed` is returned if its state changed since the caller
    /// checked it. On any error nothing is written.
    async fn redeem(
        &self,
        invite_id: Uuid,
        representative: &Representative,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}
