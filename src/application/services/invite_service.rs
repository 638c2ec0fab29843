//! Invite Service
//!
//! Issues single-use representative invite links and redeems them.
//! Redemption checks run in a fixed order so callers get the most specific
//! failure: unknown link, expired, already used, invalid input, email taken,
//! unknown company. The final write is one atomic repository call.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::company_service::{CompanyDirectory, NewRepresentative};
use super::user_service::{UserError, UserService};
use crate::domain::{
    InviteLink, InviteLinkRepository, Representative, RepositoryError, RepresentativeRepository,
};
use crate::infrastructure::metrics;

/// Invite service trait
#[async_trait]
pub trait InviteService: Send + Sync {
    /// Issue a link for joining the representative's company
    async fn create_representative_invite(&self, representative_id: Uuid) -> Result<InviteLink, InviteError>;

    /// Sign up a new representative through an invite link
    async fn redeem(
        &self,
        company_id: Uuid,
        invite_id: Uuid,
        new_representative: NewRepresentative,
    ) -> Result<Representative, InviteError>;

    async fn find_by_creator(&self, representative_id: Uuid) -> Result<Vec<InviteLink>, InviteError>;

    async fn find_by_id(&self, invite_id: Uuid) -> Result<InviteLink, InviteError>;
}

/// Invite service errors
#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error("Representative not found")]
    RepresentativeNotFound,

    #[error("Invite link not found")]
    NotFound,

    #[error("invite link has expired")]
    Expired,

    #[error("invite link has already been used")]
    AlreadyUsed,

    #[error("email is already in use and bound to an account")]
    EmailAlreadyUsed,

    #[error("company does not exist")]
    CompanyNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for InviteError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => InviteError::NotFound,
            RepositoryError::InviteExpired => InviteError::Expired,
            RepositoryError::InviteAlreadyUsed => InviteError::AlreadyUsed,
            RepositoryError::EmailTaken => InviteError::EmailAlreadyUsed,
            RepositoryError::MissingReference("company") => InviteError::CompanyNotFound,
            RepositoryError::MissingReference("representative") => InviteError::RepresentativeNotFound,
            other => InviteError::Internal(other.to_string()),
        }
    }
}

impl From<UserError> for InviteError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::EmailAlreadyUsed => InviteError::EmailAlreadyUsed,
            UserError::Validation(msg) => InviteError::Validation(msg),
            other => InviteError::Internal(other.to_string()),
        }
    }
}

/// InviteService implementation
pub struct InviteServiceImpl<I, R>
where
    I: InviteLinkRepository,
    R: RepresentativeRepository,
{
    invite_repo: Arc<I>,
    representative_repo: Arc<R>,
    companies: Arc<dyn CompanyDirectory>,
    users: Arc<dyn UserService>,
    url_template: String,
    validity: Duration,
}

impl<I, R> InviteServiceImpl<I, R>
where
    I: InviteLinkRepository,
    R: RepresentativeRepository,
{
    pub fn new(
        invite_repo: Arc<I>,
        representative_repo: Arc<R>,
        companies: Arc<dyn CompanyDirectory>,
        users: Arc<dyn UserService>,
        url_template: String,
        validity: Duration,
    ) -> Self {
        Self {
            invite_repo,
            representative_repo,
            companies,
            users,
            url_template,
            validity,
        }
    }
}

#[async_trait]
impl<I, R> InviteService for InviteServiceImpl<I, R>
where
    I: InviteLinkRepository + 'static,
    R: RepresentativeRepository + 'static,
{
    async fn create_representative_invite(&self, representative_id: Uuid) -> Result<InviteLink, InviteError> {
        let representative = self
            .representative_repo
            .find_by_id(representative_id)
            .await?
            .ok_or(InviteError::RepresentativeNotFound)?;

        let link = representative
            .generate_invite_link(Uuid::new_v4(), &self.url_template, self.validity, Utc::now())
            .map_err(|e| InviteError::Validation(e.to_string()))?;

        self.invite_repo.create(&link).await?;

        metrics::record_invite_event("created");
        tracing::info!(
            invite_id = %link.id,
            %representative_id,
            company_id = %link.company_id,
            expires_at = %link.expiry_date,
            "Invite link created"
        );
        Ok(link)
    }

    async fn redeem(
        &self,
        company_id: Uuid,
        invite_id: Uuid,
        new_representative: NewRepresentative,
    ) -> Result<Representative, InviteError> {
        let link = self
            .invite_repo
            .find_by_id(invite_id)
            .await?
            .filter(|link| link.company_id == company_id)
            .ok_or(InviteError::NotFound)?;

        let now = Utc::now();
        if link.has_expired(now) {
            metrics::record_invite_event("rejected_expired");
            tracing::warn!(%invite_id, "Redeem of expired invite link");
            return Err(InviteError::Expired);
        }
        if link.used {
            metrics::record_invite_event("rejected_used");
            tracing::warn!(%invite_id, "Redeem of used invite link");
            return Err(InviteError::AlreadyUsed);
        }

        let representative = new_representative.into_representative(company_id)?;

        if self.users.email_already_used(&representative.user.email).await? {
            return Err(InviteError::EmailAlreadyUsed);
        }

        let company_exists = self
            .companies
            .exists(company_id)
            .await
            .map_err(|e| InviteError::Internal(e.to_string()))?;
        if !company_exists {
            return Err(InviteError::CompanyNotFound);
        }

        self.invite_repo.redeem(invite_id, &representative, now).await?;

        metrics::record_invite_event("redeemed");
        metrics::record_signup("representative");
        tracing::info!(
            %invite_id,
            representative_id = %representative.id,
            %company_id,
            "Invite link redeemed"
        );
        Ok(representative)
    }

    async fn find_by_creator(&self, representative_id: Uuid) -> Result<Vec<InviteLink>, InviteError> {
        Ok(self.invite_repo.find_by_creator(representative_id).await?)
    }

    async fn find_by_id(&self, invite_id: Uuid) -> Result<InviteLink, InviteError> {
        self.invite_repo
            .find_by_id(invite_id)
            .await?
            .ok_or(InviteError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::company_service::{CompanyService, CompanyServiceImpl};
    use crate::application::services::fixtures::{new_company, new_representative};
    use crate::application::services::user_service::UserServiceImpl;
    use crate::domain::{Company, MockInviteLinkRepository};
    use crate::infrastructure::memory::{
        MemoryCompanyRepository, MemoryInviteLinkRepository, MemoryRepresentativeRepository, MemoryStore,
        MemoryUserRepository,
    };

    const TEMPLATE: &str = "https://localhost:3000/signup/representatives/invite/<[companyID]>/<[inviteID]>";

    struct Fixture {
        companies: Arc<CompanyServiceImpl<MemoryCompanyRepository>>,
        users: Arc<dyn UserService>,
        store: MemoryStore,
    }

    impl Fixture {
        fn new() -> Self {
            let store = MemoryStore::new();
            let users: Arc<dyn UserService> =
                Arc::new(UserServiceImpl::new(Arc::new(MemoryUserRepository::new(store.clone()))));
            let companies = Arc::new(CompanyServiceImpl::new(
                Arc::new(MemoryCompanyRepository::new(store.clone())),
                users.clone(),
            ));
            Self { companies, users, store }
        }

        fn service(&self, validity: Duration) -> InviteServiceImpl<MemoryInviteLinkRepository, MemoryRepresentativeRepository> {
            self.service_with(Arc::new(MemoryInviteLinkRepository::new(self.store.clone())), validity)
        }

        fn service_with<I: InviteLinkRepository>(
            &self,
            invite_repo: Arc<I>,
            validity: Duration,
        ) -> InviteServiceImpl<I, MemoryRepresentativeRepository> {
            InviteServiceImpl::new(
                invite_repo,
                Arc::new(MemoryRepresentativeRepository::new(self.store.clone())),
                self.companies.clone(),
                self.users.clone(),
                TEMPLATE.into(),
                validity,
            )
        }

        async fn acme(&self) -> Company {
            self.companies.register(new_company("acme", "a@x.com")).await.unwrap()
        }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    #[tokio::test]
    async fn test_create_invite_link() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let rep_id = acme.representatives[0].id;
        let service = fx.service(Duration::hours(24));

        let before = Utc::now();
        let link = service.create_representative_invite(rep_id).await.unwrap();

        assert!(!link.used);
        assert_eq!(link.created_by, rep_id);
        assert_eq!(link.company_id, acme.id);
        assert_eq!(
            link.url,
            format!("https://localhost:3000/signup/representatives/invite/{}/{}", acme.id, link.id)
        );
        assert!(link.expiry_date >= before + Duration::hours(24));
        assert!(link.expiry_date <= Utc::now() + Duration::hours(24));
        assert_eq!(service.find_by_creator(rep_id).await.unwrap(), vec![link]);
    }

    #[tokio::test]
    async fn test_create_invite_unknown_representative() {
        let fx = Fixture::new();

        let result = fx.service(Duration::hours(24)).create_representative_invite(Uuid::new_v4()).await;
        assert!(matches!(result, Err(InviteError::RepresentativeNotFound)));
    }

    // ========================================================================
    // Redemption
    // ========================================================================

    #[tokio::test]
    async fn test_redeem_round_trip() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let service = fx.service(Duration::hours(24));
        let link = service
            .create_representative_invite(acme.representatives[0].id)
            .await
            .unwrap();

        let rep = service
            .redeem(acme.id, link.id, new_representative("new@x.com"))
            .await
            .unwrap();

        assert_eq!(rep.company_id, acme.id);
        assert!(service.find_by_id(link.id).await.unwrap().used);
        let company = fx.companies.find_by_id(acme.id).await.unwrap();
        assert_eq!(company.representatives.len(), 2);
        assert!(company.has_representative(rep.id));
    }

    #[tokio::test]
    async fn test_redeem_twice_fails_already_used() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let service = fx.service(Duration::hours(24));
        let link = service
            .create_representative_invite(acme.representatives[0].id)
            .await
            .unwrap();

        service.redeem(acme.id, link.id, new_representative("b@x.com")).await.unwrap();
        let second = service.redeem(acme.id, link.id, new_representative("c@x.com")).await;

        assert!(matches!(second, Err(InviteError::AlreadyUsed)));
        assert!(!fx.users.email_already_used("c@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_redeem_expired_link() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let service = fx.service(Duration::seconds(-1));
        let link = service
            .create_representative_invite(acme.representatives[0].id)
            .await
            .unwrap();

        let result = service.redeem(acme.id, link.id, new_representative("b@x.com")).await;

        assert!(matches!(result, Err(InviteError::Expired)));
        assert!(!service.find_by_id(link.id).await.unwrap().used);
    }

    #[tokio::test]
    async fn test_redeem_expired_wins_over_used() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let service = fx.service(Duration::hours(24));
        let mut link = acme.representatives[0]
            .generate_invite_link(Uuid::new_v4(), TEMPLATE, Duration::seconds(-1), Utc::now())
            .unwrap();
        link.used = true;
        MemoryInviteLinkRepository::new(fx.store.clone()).create(&link).await.unwrap();

        let result = service.redeem(acme.id, link.id, new_representative("b@x.com")).await;
        assert!(matches!(result, Err(InviteError::Expired)));
    }

    #[tokio::test]
    async fn test_redeem_with_wrong_company_is_not_found() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let service = fx.service(Duration::hours(24));
        let link = service
            .create_representative_invite(acme.representatives[0].id)
            .await
            .unwrap();

        let result = service.redeem(Uuid::new_v4(), link.id, new_representative("b@x.com")).await;
        assert!(matches!(result, Err(InviteError::NotFound)));

        let result = service.redeem(acme.id, Uuid::new_v4(), new_representative("b@x.com")).await;
        assert!(matches!(result, Err(InviteError::NotFound)));
    }

    #[tokio::test]
    async fn test_redeem_with_taken_email_keeps_link_unused() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let service = fx.service(Duration::hours(24));
        let link = service
            .create_representative_invite(acme.representatives[0].id)
            .await
            .unwrap();

        let result = service.redeem(acme.id, link.id, new_representative("A@x.com")).await;

        assert!(matches!(result, Err(InviteError::EmailAlreadyUsed)));
        assert!(!service.find_by_id(link.id).await.unwrap().used);
    }

    #[tokio::test]
    async fn test_redeem_persistence_failure_leaves_link_unused() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let link = acme.representatives[0]
            .generate_invite_link(Uuid::new_v4(), TEMPLATE, Duration::hours(24), Utc::now())
            .unwrap();

        let mut repo = MockInviteLinkRepository::new();
        let stored = link.clone();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_redeem()
            .times(1)
            .returning(|_, _, _| Err(RepositoryError::EmailTaken));

        let service = fx.service_with(Arc::new(repo), Duration::hours(24));
        let result = service.redeem(acme.id, link.id, new_representative("late@x.com")).await;

        assert!(matches!(result, Err(InviteError::EmailAlreadyUsed)));
        assert!(!fx.users.email_already_used("late@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_redeem_lost_race_reports_already_used() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let link = acme.representatives[0]
            .generate_invite_link(Uuid::new_v4(), TEMPLATE, Duration::hours(24), Utc::now())
            .unwrap();
        let invite_id = link.id;

        let mut repo = MockInviteLinkRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(link.clone())));
        repo.expect_redeem()
            .returning(|_, _, _| Err(RepositoryError::InviteAlreadyUsed));

        let service = fx.service_with(Arc::new(repo), Duration::hours(24));
        let result = service
            .redeem(acme.id, invite_id, new_representative("b@x.com"))
            .await;

        assert!(matches!(result, Err(InviteError::AlreadyUsed)));
    }

    #[tokio::test]
    async fn test_redeem_invalid_input() {
        let fx = Fixture::new();
        let acme = fx.acme().await;
        let service = fx.service(Duration::hours(24));
        let link = service
            .create_representative_invite(acme.representatives[0].id)
            .await
            .unwrap();

        let mut invalid = new_representative("b@x.com");
        invalid.job_title = String::new();
        let result = service.redeem(acme.id, link.id, invalid).await;

        assert!(matches!(result, Err(InviteError::Validation(_))));
    }
}
