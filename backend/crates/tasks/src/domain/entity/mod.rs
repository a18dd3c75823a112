//! Entities

pub mod file;
pub mod task;

pub use file::File;
pub use task::{NewTask, Task, TaskPatch};
