//! Task Title Value Object

use std::fmt;

use crate::error::{TaskError, TaskResult};

/// Maximum title length (in characters)
pub const TITLE_MAX_LENGTH: usize = 100;

/// Task title: 1 to 100 characters, not blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(raw: impl Into<String>) -> TaskResult<Self> {
        let raw = raw.into();
        let title = raw.trim();

        if title.is_empty() {
            return Err(TaskError::validation("Title is required"));
        }

        if title.chars().count() > TITLE_MAX_LENGTH {
            return Err(TaskError::validation(format!(
                "Title must be at most {TITLE_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(title.to_string()))
    }

    /// Restore from a stored value
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
