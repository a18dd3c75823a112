//! Task Use Case
//!
//! Validated, ownership-checked CRUD over tasks.

use std::sync::Arc;

use kernel::id::UserId;
use tracing::instrument;

use crate::application::ids::parse_task_id;
use crate::domain::entity::{NewTask, Task, TaskPatch};
use crate::domain::filter::TaskFilter;
use crate::domain::ownership::{OwnedAction, require_owner};
use crate::domain::repository::TaskRepository;
use crate::domain::value_object::{TaskDescription, TaskStatus, TaskTitle, parse_due_date};
use crate::error::{TaskError, TaskResult};

/// Fields for a new task, as received from a client
#[derive(Debug, Clone)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<String>,
}

/// Partial update, as received from a client
///
/// `None` leaves the field unchanged. For `description` and `due_date`,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<String>>,
}

impl CreateTaskInput {
    fn validate(self) -> TaskResult<NewTask> {
        Ok(NewTask {
            title: TaskTitle::new(self.title)?,
            description: TaskDescription::parse_optional(self.description)?,
            status: self.status,
            due_date: parse_due_date(self.due_date.as_deref())?,
        })
    }
}

impl UpdateTaskInput {
    fn validate(self) -> TaskResult<TaskPatch> {
        Ok(TaskPatch {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self
                .description
                .map(TaskDescription::parse_optional)
                .transpose()?,
            status: self.status,
            due_date: self
                .due_date
                .map(|raw| parse_due_date(raw.as_deref()))
                .transpose()?,
        })
    }
}

/// Task use case
pub struct TaskUseCase<T>
where
    T: TaskRepository,
{
    task_repo: Arc<T>,
}

impl<T> TaskUseCase<T>
where
    T: TaskRepository,
{
    pub fn new(task_repo: Arc<T>) -> Self {
        Self { task_repo }
    }

    /// Create a task owned by the caller
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn create_task(&self, user_id: UserId, input: CreateTaskInput) -> TaskResult<Task> {
        let task = Task::new(user_id, input.validate()?);

        self.task_repo.create(&task).await?;

        tracing::info!(task_id = %task.task_id, "Task created");
        Ok(task)
    }

    /// Fetch a task by its wire id
    pub async fn get_task(&self, id: &str) -> TaskResult<Task> {
        let task_id = parse_task_id(id)?;

        self.task_repo
            .find_by_id(&task_id)
            .await?
            .ok_or_else(|| TaskError::NotFound(format!("Task with id {} not found", id.trim())))
    }

    /// All tasks owned by the user, newest first
    pub async fn get_user_tasks(&self, user_id: &UserId) -> TaskResult<Vec<Task>> {
        self.task_repo.find_by_user_id(user_id).await
    }

    /// Tasks owned by the user matching the filter
    pub async fn list_tasks(&self, user_id: &UserId, filter: &TaskFilter) -> TaskResult<Vec<Task>> {
        self.task_repo.search(user_id, filter).await
    }

    /// Apply a partial update; only the owner may update
    #[instrument(skip(self, input), fields(user_id = %user_id))]
    pub async fn update_task(
        &self,
        id: &str,
        user_id: UserId,
        input: UpdateTaskInput,
    ) -> TaskResult<Task> {
        let patch = input.validate()?;
        let mut task = self.get_task(id).await?;

        require_owner(&task.user_id, &user_id, OwnedAction::UpdateTask)?;

        task.apply(patch);
        self.task_repo.update(&task).await?;

        tracing::info!(task_id = %task.task_id, status = %task.status, "Task updated");
        Ok(task)
    }

    /// Delete a task; only the owner may delete
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_task(&self, id: &str, user_id: UserId) -> TaskResult<()> {
        let task = self.get_task(id).await?;

        require_owner(&task.user_id, &user_id, OwnedAction::DeleteTask)?;

        // Someone else may have deleted it between the read and now
        if !self.task_repo.delete(&task.task_id).await? {
            return Err(TaskError::NotFound(format!(
                "Task with id {} not found",
                task.task_id
            )));
        }

        tracing::info!(task_id = %task.task_id, "Task deleted");
        Ok(())
    }
}
