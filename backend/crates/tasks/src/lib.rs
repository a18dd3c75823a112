//! Tasks Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Task and File entities, value objects, repository and storage traits
//! - `application/` - Task and file use cases
//! - `infra/` - PostgreSQL repository and local disk storage
//! - `presentation/` - GraphQL resolvers and the multipart upload endpoint
//!
//! ## Ownership
//! Only the owner of a task may update or delete it, or add and remove its
//! attachments. A file's owner is the owner of its task.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::UploadConfig;
pub use domain::{File, FileRepository, FileStorage, Task, TaskFilter, TaskRepository};
pub use error::{TaskError, TaskResult};
pub use infra::{DiskFileStorage, PgTaskRepository};
pub use presentation::{
    PgTaskState, TaskMutation, TaskQuery, TaskState, upload_router, upload_router_generic,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
