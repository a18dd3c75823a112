//! Task Entity

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};

use crate::domain::value_object::{TaskDescription, TaskStatus, TaskTitle};

/// Task entity
///
/// Only the owner (`user_id`) may change or delete a task; the check lives in
/// the use-case layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub task_id: TaskId,
    pub title: TaskTitle,
    pub description: Option<TaskDescription>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: Option<TaskDescription>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
}

/// Validated partial update
///
/// The outer `Option` is "field provided"; for nullable fields the inner
/// `None` clears the value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<TaskTitle>,
    pub description: Option<Option<TaskDescription>>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl Task {
    /// Create a task owned by `user_id` with a fresh id
    pub fn new(user_id: UserId, fields: NewTask) -> Self {
        let now = Utc::now();

        Self {
            task_id: TaskId::new(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            due_date: fields.due_date,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge provided fields; id, owner and creation time are kept
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.updated_at = Utc::now();
    }
}
