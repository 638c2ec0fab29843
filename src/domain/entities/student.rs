//! Student entity and repository trait.
//!
//! Maps to the `"Student"` table; each student owns exactly one `"User"` row.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require, User};
use crate::domain::errors::{RepositoryError, ValidationError};
use crate::domain::value_objects::{Role, StudentStatus};

/// A student looking for an internship or project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub university: String,
    pub skills: Vec<String>,
    pub experiences: Vec<String>,
    pub status: StudentStatus,

    /// Path of the uploaded resume, if any
    pub resume: Option<String>,

    pub user: User,
}

impl Student {
    /// Build a student around an already constructed user.
    pub fn new(
        university: &str,
        skills: Vec<String>,
        experiences: Vec<String>,
        status: StudentStatus,
        user: User,
    ) -> Result<Self, ValidationError> {
        if user.role != Role::Student {
            return Err(ValidationError::new("student account requires the student role"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            university: require("university", university)?,
            skills: clean_list(skills),
            experiences: clean_list(experiences),
            status,
            resume: None,
            user,
        })
    }
}

/// Drop blank entries and trim the rest.
fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Repository trait for Student aggregates (student + owned user).
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert the user and student rows in one unit of work.
    async fn create(&self, student: &Student) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Student>, RepositoryError>;

    /// Rewrite the student row and its user's name/email in one unit of work.
    async fn update(&self, student: &Student) -> Result<(), RepositoryError>;

    /// Remove the student together with its user.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_user() -> User {
        User::new("s@uni.nl", "hash".into(), "sam", "smit", Role::Student).unwrap()
    }

    #[test]
    fn test_new_student_cleans_lists() {
        let student = Student::new(
            "Hogeschool Utrecht",
            vec![" rust ".into(), "".into(), "go".into()],
            vec!["   ".into()],
            StudentStatus::Available,
            student_user(),
        )
        .unwrap();

        assert_eq!(student.university, "hogeschool utrecht");
        assert_eq!(student.skills, vec!["rust", "go"]);
        assert!(student.experiences.is_empty());
        assert!(student.resume.is_none());
    }

    #[test]
    fn test_new_student_requires_university() {
        let result = Student::new("", vec![], vec![], StudentStatus::Available, student_user());
        assert!(result.is_err());
    }

    #[test]
    fn test_new_student_rejects_representative_user() {
        let user = User::new("r@x.com", "hash".into(), "r", "r", Role::Representative).unwrap();
        let result = Student::new("uu", vec![], vec![], StudentStatus::Available, user);
        assert!(result.is_err());
    }
}
