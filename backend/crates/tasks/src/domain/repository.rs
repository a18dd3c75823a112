//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{FileId, TaskId, UserId};

use crate::domain::entity::{File, Task};
use crate::domain::filter::TaskFilter;
use crate::error::TaskResult;

/// Task repository trait
#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    /// Insert a new task
    async fn create(&self, task: &Task) -> TaskResult<()>;

    /// Overwrite the mutable fields of an existing task
    async fn update(&self, task: &Task) -> TaskResult<()>;

    /// Find task by ID
    async fn find_by_id(&self, task_id: &TaskId) -> TaskResult<Option<Task>>;

    /// All tasks owned by the user, newest first
    async fn find_by_user_id(&self, user_id: &UserId) -> TaskResult<Vec<Task>>;

    /// Tasks owned by the user matching the filter
    async fn search(&self, user_id: &UserId, filter: &TaskFilter) -> TaskResult<Vec<Task>>;

    /// Delete a task, returning whether a row was removed
    async fn delete(&self, task_id: &TaskId) -> TaskResult<bool>;
}

/// File metadata repository trait
#[trait_variant::make(FileRepository: Send)]
pub trait LocalFileRepository {
    /// Insert a new file record
    async fn create(&self, file: &File) -> TaskResult<()>;

    /// Find file by ID
    async fn find_by_id(&self, file_id: &FileId) -> TaskResult<Option<File>>;

    /// Files attached to a task, oldest first
    async fn find_by_task_id(&self, task_id: &TaskId) -> TaskResult<Vec<File>>;

    /// Delete a file record, returning whether a row was removed
    async fn delete(&self, file_id: &FileId) -> TaskResult<bool>;
}
