//! Repository trait implementations over [`MemoryStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::MemoryStore;
use crate::domain::{
    Company, CompanyRepository, InviteLink, InviteLinkRepository, Project, ProjectRepository,
    Representative, RepositoryError, RepresentativeRepository, Student, StudentRepository, User,
    UserRepository,
};

macro_rules! memory_repository {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            store: MemoryStore,
        }

        impl $name {
            pub fn new(store: MemoryStore) -> Self {
                Self { store }
            }
        }
    };
}

memory_repository!(
    /// In-memory user repository.
    MemoryUserRepository
);
memory_repository!(
    /// In-memory student repository.
    MemoryStudentRepository
);
memory_repository!(
    /// In-memory company repository.
    MemoryCompanyRepository
);
memory_repository!(
    /// In-memory representative repository.
    MemoryRepresentativeRepository
);
memory_repository!(
    /// In-memory project repository.
    MemoryProjectRepository
);
memory_repository!(
    /// In-memory invite link repository.
    MemoryInviteLinkRepository
);

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        self.store.write(|t| t.insert_user(user))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.read(|t| t.user(id)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.store.read(|t| t.user_by_email(email)))
    }

    async fn find_role_id(&self, user: &User) -> Result<Option<Uuid>, RepositoryError> {
        Ok(self.store.read(|t| t.role_id_of(user.id)))
    }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn create(&self, student: &Student) -> Result<(), RepositoryError> {
        self.store.write(|t| t.insert_student(student))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, RepositoryError> {
        Ok(self.store.read(|t| t.student(id)))
    }

    async fn find_all(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(self.store.read(|t| t.students()))
    }

    async fn update(&self, student: &Student) -> Result<(), RepositoryError> {
        self.store.write(|t| t.update_student(student))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.write(|t| t.delete_student(id))
    }
}

#[async_trait]
impl CompanyRepository for MemoryCompanyRepository {
    async fn create(&self, company: &Company) -> Result<(), RepositoryError> {
        self.store.write(|t| t.insert_company(company))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, RepositoryError> {
        Ok(self.store.read(|t| t.company(id)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, RepositoryError> {
        Ok(self.store.read(|t| t.company_by_name(name)))
    }

    async fn find_all(&self) -> Result<Vec<Company>, RepositoryError> {
        Ok(self.store.read(|t| t.companies()))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.store.read(|t| t.company_exists(id)))
    }

    async fn update(&self, company: &Company) -> Result<(), RepositoryError> {
        self.store.write(|t| t.update_company(company))
    }
}

#[async_trait]
impl RepresentativeRepository for MemoryRepresentativeRepository {
    async fn create(&self, representative: &Representative) -> Result<(), RepositoryError> {
        self.store.write(|t| t.insert_representative(representative))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Representative>, RepositoryError> {
        Ok(self.store.read(|t| t.representative(id)))
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn create(&self, project: &Project) -> Result<(), RepositoryError> {
        self.store.write(|t| t.insert_project(project))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        Ok(self.store.read(|t| t.project(id)))
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        Ok(self.store.read(|t| t.projects()))
    }

    async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<Project>, RepositoryError> {
        Ok(self.store.read(|t| t.projects_of(company_id)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.write(|t| t.delete_project(id))
    }
}

#[async_trait]
impl InviteLinkRepository for MemoryInviteLinkRepository {
    async fn create(&self, link: &InviteLink) -> Result<(), RepositoryError> {
        self.store.write(|t| t.insert_invite_link(link))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<InviteLink>, RepositoryError> {
        Ok(self.store.read(|t| t.invite_link(id)))
    }

    async fn find_by_creator(&self, representative_id: Uuid) -> Result<Vec<InviteLink>, RepositoryError> {
        Ok(self.store.read(|t| t.invite_links_by(representative_id)))
    }

    async fn redeem(
        &self,
        invite_id: Uuid,
        representative: &Representative,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        self.store
            .write(|t| t.redeem_invite_link(invite_id, representative, now))
    }
}
