//! Value Objects

pub mod due_date;
pub mod task_description;
pub mod task_status;
pub mod task_title;
pub mod upload;

pub use due_date::parse_due_date;
pub use task_description::TaskDescription;
pub use task_status::TaskStatus;
pub use task_title::TaskTitle;
pub use upload::{ALLOWED_MIME_TYPES, FileName, FileSize, MAX_FILE_SIZE, MimeType};
