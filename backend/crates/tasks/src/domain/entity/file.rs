//! File Entity
//!
//! An attachment stored through a `FileStorage`. Ownership is derived from the
//! task it belongs to.

use chrono::{DateTime, Utc};
use kernel::id::{FileId, TaskId};

use crate::domain::value_object::{FileName, FileSize, MimeType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub file_id: FileId,
    pub task_id: TaskId,
    pub filename: String,
    pub mimetype: String,
    /// Size in bytes
    pub size: u64,
    /// Opaque storage locator
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl File {
    pub fn new(
        task_id: TaskId,
        filename: FileName,
        mimetype: MimeType,
        size: FileSize,
        path: String,
    ) -> Self {
        Self {
            file_id: FileId::new(),
            task_id,
            filename: filename.into_inner(),
            mimetype: mimetype.into_inner(),
            size: size.bytes(),
            path,
            created_at: Utc::now(),
        }
    }
}
