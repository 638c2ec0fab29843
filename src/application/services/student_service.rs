//! Student Service
//!
//! Student signup, profile edits, resume uploads and account removal.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::user_service::{NewAccount, UserError, UserService};
use crate::domain::{RepositoryError, Role, Student, StudentRepository, StudentStatus, User};
use crate::infrastructure::metrics;
use crate::infrastructure::storage::ResumeStorage;

/// Leading bytes of every PDF document
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Student service trait
#[async_trait]
pub trait StudentService: Send + Sync {
    async fn register(&self, new_student: NewStudent) -> Result<Student, StudentError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Student, StudentError>;

    async fn find_all(&self) -> Result<Vec<Student>, StudentError>;

    /// Update a student's own profile
    async fn edit(
        &self,
        student_id: Uuid,
        requester_id: Uuid,
        update: StudentUpdate,
    ) -> Result<Student, StudentError>;

    /// Store a PDF resume and record its path
    async fn attach_resume(
        &self,
        student_id: Uuid,
        requester_id: Uuid,
        content_type: Option<&str>,
        contents: &[u8],
    ) -> Result<Student, StudentError>;

    /// Remove the student and its user
    async fn delete(&self, student_id: Uuid, requester_id: Uuid) -> Result<(), StudentError>;
}

/// Student signup payload.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub account: NewAccount,
    pub university: String,
    pub skills: Vec<String>,
    pub experiences: Vec<String>,
    pub status: StudentStatus,
}

/// Partial student update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experiences: Option<Vec<String>>,
    pub status: Option<StudentStatus>,
}

/// Student service errors
#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    #[error("Student not found")]
    NotFound,

    #[error("email is already in use and bound to an account")]
    EmailAlreadyUsed,

    #[error("students may only change their own account")]
    Forbidden,

    #[error("resume must be a PDF document")]
    InvalidResume,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for StudentError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::EmailTaken => StudentError::EmailAlreadyUsed,
            RepositoryError::NotFound => StudentError::NotFound,
            other => StudentError::Internal(other.to_string()),
        }
    }
}

impl From<UserError> for StudentError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::EmailAlreadyUsed => StudentError::EmailAlreadyUsed,
            UserError::Validation(msg) => StudentError::Validation(msg),
            other => StudentError::Internal(other.to_string()),
        }
    }
}

/// StudentService implementation
pub struct StudentServiceImpl<S>
where
    S: StudentRepository,
{
    student_repo: Arc<S>,
    users: Arc<dyn UserService>,
    resumes: Arc<dyn ResumeStorage>,
}

impl<S> StudentServiceImpl<S>
where
    S: StudentRepository,
{
    pub fn new(student_repo: Arc<S>, users: Arc<dyn UserService>, resumes: Arc<dyn ResumeStorage>) -> Self {
        Self {
            student_repo,
            users,
            resumes,
        }
    }

    /// Load a student the requester is allowed to modify.
    async fn owned(&self, student_id: Uuid, requester_id: Uuid) -> Result<Student, StudentError> {
        if student_id != requester_id {
            tracing::warn!(%student_id, %requester_id, "Student tried to modify another account");
            return Err(StudentError::Forbidden);
        }

        self.student_repo
            .find_by_id(student_id)
            .await?
            .ok_or(StudentError::NotFound)
    }
}

#[async_trait]
impl<S> StudentService for StudentServiceImpl<S>
where
    S: StudentRepository + 'static,
{
    async fn register(&self, new_student: NewStudent) -> Result<Student, StudentError> {
        let user = new_student.account.into_user(Role::Student)?;
        let student = Student::new(
            &new_student.university,
            new_student.skills,
            new_student.experiences,
            new_student.status,
            user,
        )
        .map_err(|e| StudentError::Validation(e.to_string()))?;

        if self.users.email_already_used(&student.user.email).await? {
            return Err(StudentError::EmailAlreadyUsed);
        }

        self.student_repo.create(&student).await?;

        metrics::record_signup("student");
        tracing::info!(student_id = %student.id, "Student registered");
        Ok(student)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Student, StudentError> {
        self.student_repo
            .find_by_id(id)
            .await?
            .ok_or(StudentError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Student>, StudentError> {
        Ok(self.student_repo.find_all().await?)
    }

    async fn edit(
        &self,
        student_id: Uuid,
        requester_id: Uuid,
        update: StudentUpdate,
    ) -> Result<Student, StudentError> {
        let current = self.owned(student_id, requester_id).await?;

        // Rebuild through the constructors so edits get the same validation
        let user = User::new(
            update.email.as_deref().unwrap_or(&current.user.email),
            current.user.password_hash.clone(),
            update.first_name.as_deref().unwrap_or(&current.user.first_name),
            update.last_name.as_deref().unwrap_or(&current.user.last_name),
            Role::Student,
        )
        .map_err(|e| StudentError::Validation(e.to_string()))?;

        if user.email != current.user.email && self.users.email_already_used(&user.email).await? {
            return Err(StudentError::EmailAlreadyUsed);
        }

        let rebuilt = Student::new(
            update.university.as_deref().unwrap_or(&current.university),
            update.skills.unwrap_or_else(|| current.skills.clone()),
            update.experiences.unwrap_or_else(|| current.experiences.clone()),
            update.status.unwrap_or(current.status),
            User { id: current.user.id, ..user },
        )
        .map_err(|e| StudentError::Validation(e.to_string()))?;

        let student = Student {
            id: current.id,
            resume: current.resume,
            ..rebuilt
        };

        self.student_repo.update(&student).await?;

        tracing::info!(%student_id, "Student profile updated");
        Ok(student)
    }

    async fn attach_resume(
        &self,
        student_id: Uuid,
        requester_id: Uuid,
        content_type: Option<&str>,
        contents: &[u8],
    ) -> Result<Student, StudentError> {
        let mut student = self.owned(student_id, requester_id).await?;

        let declared_pdf = content_type.map_or(true, |ct| ct.eq_ignore_ascii_case("application/pdf"));
        if !declared_pdf || !contents.starts_with(PDF_MAGIC) {
            return Err(StudentError::InvalidResume);
        }

        let path = self
            .resumes
            .save(student.id, contents)
            .await
            .map_err(|e| StudentError::Internal(format!("Failed to store resume: {}", e)))?;

        student.resume = Some(path);
        self.student_repo.update(&student).await?;

        tracing::info!(%student_id, bytes = contents.len(), "Resume uploaded");
        Ok(student)
    }

    async fn delete(&self, student_id: Uuid, requester_id: Uuid) -> Result<(), StudentError> {
        self.owned(student_id, requester_id).await?;
        self.student_repo.delete(student_id).await?;

        tracing::info!(%student_id, "Student deleted");
        Ok(())
    }
}
