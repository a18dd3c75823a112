//! Shared presentation state

use std::sync::Arc;

use crate::application::{FileUseCase, TaskUseCase, UploadConfig};
use crate::domain::repository::{FileRepository, TaskRepository};
use crate::domain::storage::FileStorage;
use crate::infra::{DiskFileStorage, PgTaskRepository};

/// State shared by the upload endpoint and the GraphQL resolvers
///
/// `R` stores both tasks and file records.
pub struct TaskState<R, S> {
    pub repo: Arc<R>,
    pub storage: Arc<S>,
    pub config: Arc<UploadConfig>,
}

/// Production state
pub type PgTaskState = TaskState<PgTaskRepository, DiskFileStorage>;

impl<R, S> Clone for TaskState<R, S> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R, S> TaskState<R, S>
where
    R: TaskRepository + FileRepository,
    S: FileStorage,
{
    pub fn new(repo: Arc<R>, storage: Arc<S>, config: UploadConfig) -> Self {
        Self {
            repo,
            storage,
            config: Arc::new(config),
        }
    }

    pub fn tasks(&self) -> TaskUseCase<R> {
        TaskUseCase::new(Arc::clone(&self.repo))
    }

    pub fn files(&self) -> FileUseCase<R, R, S> {
        FileUseCase::new(
            Arc::clone(&self.repo),
            Arc::clone(&self.repo),
            Arc::clone(&self.storage),
        )
        .with_max_file_size(self.config.max_file_size)
    }
}
