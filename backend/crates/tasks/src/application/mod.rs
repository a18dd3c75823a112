//! Application Layer
//!
//! Use cases orchestrating the domain ports.

pub mod config;
pub(crate) mod ids;
pub mod file_use_case;
pub mod task_use_case;

pub use config::UploadConfig;
pub use file_use_case::{FileUseCase, UploadInput};
pub use task_use_case::{CreateTaskInput, TaskUseCase, UpdateTaskInput};
