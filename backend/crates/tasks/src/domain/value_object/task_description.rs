//! Task Description Value Object

use crate::error::{TaskError, TaskResult};

/// Maximum description length (in characters)
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Optional free text attached to a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescription(String);

impl TaskDescription {
    pub fn new(raw: impl Into<String>) -> TaskResult<Self> {
        let raw = raw.into();

        if raw.chars().count() > DESCRIPTION_MAX_LENGTH {
            return Err(TaskError::validation(format!(
                "Description must be at most {DESCRIPTION_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(raw))
    }

    /// Validate an optional description
    pub fn parse_optional(raw: Option<String>) -> TaskResult<Option<Self>> {
        raw.map(Self::new).transpose()
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
