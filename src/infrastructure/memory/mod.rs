//! In-memory storage backend.
//!
//! All tables live behind a single [`parking_lot::RwLock`]. Aggregate writes
//! validate every constraint before mutating anything and happen under one
//! write guard, so a failed write leaves no partial state and concurrent
//! writers cannot both pass a uniqueness check.

mod repositories;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{
    Address, Company, InviteLink, Project, Representative, RepositoryError, Student,
    StudentStatus, User,
};

pub use repositories::{
    MemoryCompanyRepository, MemoryInviteLinkRepository, MemoryProjectRepository,
    MemoryRepresentativeRepository, MemoryStudentRepository, MemoryUserRepository,
};

/// Shared handle to the in-memory tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        f(&self.tables.read())
    }

    pub(crate) fn write<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        f(&mut self.tables.write())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StudentRecord {
    id: Uuid,
    university: String,
    skills: Vec<String>,
    experiences: Vec<String>,
    status: StudentStatus,
    resume: Option<String>,
    user_id: Uuid,
}

#[derive(Debug, Clone)]
pub(crate) struct CompanyRecord {
    id: Uuid,
    name: String,
    information: String,
    description: String,
    locations: Vec<Address>,
}

#[derive(Debug, Clone)]
pub(crate) struct RepresentativeRecord {
    id: Uuid,
    job_title: String,
    user_id: Uuid,
    company_id: Uuid,
}

/// Normalized table set mirroring the PostgreSQL schema.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    users: HashMap<Uuid, User>,
    students: HashMap<Uuid, StudentRecord>,
    companies: HashMap<Uuid, CompanyRecord>,
    representatives: HashMap<Uuid, RepresentativeRecord>,
    /// Insertion ordered
    projects: Vec<Project>,
    invite_links: HashMap<Uuid, InviteLink>,
}

impl Tables {
    // ========================================================================
    // Constraint checks
    // ========================================================================

    fn email_taken(&self, email: &str, except_user: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except_user && u.email.eq_ignore_ascii_case(email))
    }

    fn company_name_taken(&self, name: &str, except_company: Option<Uuid>) -> bool {
        self.companies
            .values()
            .any(|c| Some(c.id) != except_company && c.name.eq_ignore_ascii_case(name))
    }

    /// Reject a batch of new users whose emails collide with stored users or
    /// with each other.
    fn check_new_users<'a>(&self, users: impl IntoIterator<Item = &'a User>) -> Result<(), RepositoryError> {
        let mut seen: Vec<String> = Vec::new();
        for user in users {
            let email = user.email.to_lowercase();
            if self.email_taken(&email, None) || seen.contains(&email) {
                return Err(RepositoryError::EmailTaken);
            }
            seen.push(email);
        }
        Ok(())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub(crate) fn insert_user(&mut self, user: &User) -> Result<(), RepositoryError> {
        self.check_new_users([user])?;
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    pub(crate) fn user(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).cloned()
    }

    pub(crate) fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
    }

    pub(crate) fn role_id_of(&self, user_id: Uuid) -> Option<Uuid> {
        self.students
            .values()
            .find(|s| s.user_id == user_id)
            .map(|s| s.id)
            .or_else(|| {
                self.representatives
                    .values()
                    .find(|r| r.user_id == user_id)
                    .map(|r| r.id)
            })
    }

    // ========================================================================
    // Students
    // ========================================================================

    pub(crate) fn insert_student(&mut self, student: &Student) -> Result<(), RepositoryError> {
        self.check_new_users([&student.user])?;

        self.users.insert(student.user.id, student.user.clone());
        self.students.insert(
            student.id,
            StudentRecord {
                id: student.id,
                university: student.university.clone(),
                skills: student.skills.clone(),
                experiences: student.experiences.clone(),
                status: student.status,
                resume: student.resume.clone(),
                user_id: student.user.id,
            },
        );
        Ok(())
    }

    pub(crate) fn update_student(&mut self, student: &Student) -> Result<(), RepositoryError> {
        let record = self.students.get(&student.id).ok_or(RepositoryError::NotFound)?;
        let user_id = record.user_id;
        if self.email_taken(&student.user.email, Some(user_id)) {
            return Err(RepositoryError::EmailTaken);
        }
        let user = self.users.get_mut(&user_id).ok_or(RepositoryError::NotFound)?;
        user.email = student.user.email.clone();
        user.first_name = student.user.first_name.clone();
        user.last_name = student.user.last_name.clone();

        if let Some(record) = self.students.get_mut(&student.id) {
            record.university = student.university.clone();
            record.skills = student.skills.clone();
            record.experiences = student.experiences.clone();
            record.status = student.status;
            record.resume = student.resume.clone();
        }
        Ok(())
    }

    pub(crate) fn delete_student(&mut self, id: Uuid) -> Result<(), RepositoryError> {
        let record = self.students.remove(&id).ok_or(RepositoryError::NotFound)?;
        self.users.remove(&record.user_id);
        Ok(())
    }

    pub(crate) fn student(&self, id: Uuid) -> Option<Student> {
        self.students.get(&id).and_then(|r| self.assemble_student(r))
    }

    pub(crate) fn students(&self) -> Vec<Student> {
        let mut students: Vec<Student> = self
            .students
            .values()
            .filter_map(|r| self.assemble_student(r))
            .collect();
        students.sort_by(|a, b| {
            (&a.user.last_name, &a.user.first_name).cmp(&(&b.user.last_name, &b.user.first_name))
        });
        students
    }

    fn assemble_student(&self, record: &StudentRecord) -> Option<Student> {
        Some(Student {
            id: record.id,
            university: record.university.clone(),
            skills: record.skills.clone(),
            experiences: record.experiences.clone(),
            status: record.status,
            resume: record.resume.clone(),
            user: self.user(record.user_id)?,
        })
    }

    // ========================================================================
    // Representatives
    // ========================================================================

    pub(crate) fn insert_representative(&mut self, representative: &Representative) -> Result<(), RepositoryError> {
        if !self.companies.contains_key(&representative.company_id) {
            return Err(RepositoryError::MissingReference("company"));
        }
        self.check_new_users([&representative.user])?;

        self.put_representative(representative);
        Ok(())
    }

    /// Insert without checks; callers validate first.
    fn put_representative(&mut self, representative: &Representative) {
        self.users.insert(representative.user.id, representative.user.clone());
        self.representatives.insert(
            representative.id,
            RepresentativeRecord {
                id: representative.id,
                job_title: representative.job_title.clone(),
                user_id: representative.user.id,
                company_id: representative.company_id,
            },
        );
    }

    pub(crate) fn representative(&self, id: Uuid) -> Option<Representative> {
        self.representatives
            .get(&id)
            .and_then(|r| self.assemble_representative(r))
    }

    fn assemble_representative(&self, record: &RepresentativeRecord) -> Option<Representative> {
        Some(Representative {
            id: record.id,
            job_title: record.job_title.clone(),
            user: self.user(record.user_id)?,
            company_id: record.company_id,
        })
    }

    // ========================================================================
    // Companies
    // ========================================================================

    pub(crate) fn insert_company(&mut self, company: &Company) -> Result<(), RepositoryError> {
        if self.company_name_taken(&company.name, None) {
            return Err(RepositoryError::CompanyNameTaken);
        }
        self.check_new_users(company.representatives.iter().map(|r| &r.user))?;

        self.companies.insert(
            company.id,
            CompanyRecord {
                id: company.id,
                name: company.name.clone(),
                information: company.information.clone(),
                description: company.description.clone(),
                locations: company.locations.clone(),
            },
        );
        for representative in &company.representatives {
            self.put_representative(representative);
        }
        for project in &company.projects {
            self.upsert_project(project);
        }
        Ok(())
    }

    pub(crate) fn update_company(&mut self, company: &Company) -> Result<(), RepositoryError> {
        if !self.companies.contains_key(&company.id) {
            return Err(RepositoryError::NotFound);
        }
        if self.company_name_taken(&company.name, Some(company.id)) {
            return Err(RepositoryError::CompanyNameTaken);
        }

        if let Some(record) = self.companies.get_mut(&company.id) {
            record.name = company.name.clone();
            record.information = company.information.clone();
            record.description = company.description.clone();
            for address in &company.locations {
                match record.locations.iter_mut().find(|a| a.id == address.id) {
                    Some(existing) => *existing = address.clone(),
                    None => record.locations.push(address.clone()),
                }
            }
        }
        for project in &company.projects {
            self.upsert_project(project);
        }
        Ok(())
    }

    pub(crate) fn company_exists(&self, id: Uuid) -> bool {
        self.companies.contains_key(&id)
    }

    pub(crate) fn company(&self, id: Uuid) -> Option<Company> {
        self.companies.get(&id).map(|r| self.assemble_company(r))
    }

    pub(crate) fn company_by_name(&self, name: &str) -> Option<Company> {
        self.companies
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .map(|r| self.assemble_company(r))
    }

    pub(crate) fn companies(&self) -> Vec<Company> {
        let mut companies: Vec<Company> = self
            .companies
            .values()
            .map(|r| self.assemble_company(r))
            .collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        companies
    }

    fn assemble_company(&self, record: &CompanyRecord) -> Company {
        let mut representatives: Vec<Representative> = self
            .representatives
            .values()
            .filter(|r| r.company_id == record.id)
            .filter_map(|r| self.assemble_representative(r))
            .collect();
        representatives.sort_by(|a, b| {
            (&a.user.last_name, &a.user.first_name).cmp(&(&b.user.last_name, &b.user.first_name))
        });

        Company {
            id: record.id,
            name: record.name.clone(),
            information: record.information.clone(),
            description: record.description.clone(),
            locations: record.locations.clone(),
            representatives,
            projects: self.projects_of(record.id),
        }
    }

    // ========================================================================
    // Projects
    // ========================================================================

    pub(crate) fn insert_project(&mut self, project: &Project) -> Result<(), RepositoryError> {
        if !self.companies.contains_key(&project.company_id) {
            return Err(RepositoryError::MissingReference("company"));
        }
        self.upsert_project(project);
        Ok(())
    }

    fn upsert_project(&mut self, project: &Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => self.projects.push(project.clone()),
        }
    }

    pub(crate) fn project(&self, id: Uuid) -> Option<Project> {
        self.projects.iter().find(|p| p.id == id).cloned()
    }

    pub(crate) fn projects(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub(crate) fn projects_of(&self, company_id: Uuid) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect()
    }

    pub(crate) fn delete_project(&mut self, id: Uuid) -> Result<(), RepositoryError> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    // ========================================================================
    // Invite links
    // ========================================================================

    pub(crate) fn insert_invite_link(&mut self, link: &InviteLink) -> Result<(), RepositoryError> {
        if !self.representatives.contains_key(&link.created_by) {
            return Err(RepositoryError::MissingReference("representative"));
        }
        if !self.companies.contains_key(&link.company_id) {
            return Err(RepositoryError::MissingReference("company"));
        }
        self.invite_links.insert(link.id, link.clone());
        Ok(())
    }

    pub(crate) fn invite_link(&self, id: Uuid) -> Option<InviteLink> {
        self.invite_links.get(&id).cloned()
    }

    pub(crate) fn invite_links_by(&self, representative_id: Uuid) -> Vec<InviteLink> {
        let mut links: Vec<InviteLink> = self
            .invite_links
            .values()
            .filter(|l| l.created_by == representative_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links
    }

    pub(crate) fn redeem_invite_link(
        &mut self,
        invite_id: Uuid,
        representative: &Representative,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), RepositoryError> {
        let link = self.invite_links.get(&invite_id).ok_or(RepositoryError::NotFound)?;
        if link.has_expired(now) {
            return Err(RepositoryError::InviteExpired);
        }
        if link.used {
            return Err(RepositoryError::InviteAlreadyUsed);
        }

        self.insert_representative(representative)?;

        if let Some(link) = self.invite_links.get_mut(&invite_id) {
            link.used = true;
        }
        Ok(())
    }
}
