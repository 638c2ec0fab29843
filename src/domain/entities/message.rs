//! Message between users, optionally about a project.
//!
//! Only construction and validation live here; messages are not persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Email or id of the sending user
    pub sender: String,

    /// Email or id of the receiving user
    pub receiver: String,

    pub body: String,

    /// The project that prompted the message
    pub project_id: Option<Uuid>,
}

impl Message {
    pub fn new(
        sender: &str,
        receiver: &str,
        body: &str,
        project_id: Option<Uuid>,
    ) -> Result<Self, ValidationError> {
        let non_empty = |field: &str, value: &str| {
            if value.trim().is_empty() {
                Err(ValidationError::new(format!("provided {field} can't be empty")))
            } else {
                Ok(value.trim().to_string())
            }
        };

        Ok(Self {
            sender: non_empty("sender", sender)?,
            receiver: non_empty("receiver", receiver)?,
            // Body keeps its casing
            body: non_empty("body", body)?,
            project_id,
        })
    }
}
