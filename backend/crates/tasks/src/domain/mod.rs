//! Domain Layer
//!
//! Contains entities, value objects, repository and storage traits.

pub mod entity;
pub mod filter;
pub mod ownership;
pub mod repository;
pub mod storage;
pub mod value_object;

// Re-exports
pub use entity::{File, NewTask, Task, TaskPatch};
pub use filter::{SortOrder, TaskFilter, TaskSort, TaskSortField};
pub use ownership::{OwnedAction, require_owner};
pub use repository::{FileRepository, TaskRepository};
pub use storage::FileStorage;
