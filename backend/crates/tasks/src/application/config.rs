//! Application Configuration
//!
//! Configuration for attachment uploads.

use std::path::PathBuf;

use crate::domain::value_object::MAX_FILE_SIZE;

/// Upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory where attachment bytes are written
    pub upload_dir: PathBuf,
    /// Largest accepted attachment in bytes
    pub max_file_size: u64,
    /// Request body limit for the multipart endpoint (file plus form overhead)
    pub body_limit: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            max_file_size: MAX_FILE_SIZE,
            body_limit: 2 * MAX_FILE_SIZE as usize,
        }
    }
}

impl UploadConfig {
    /// Create config storing uploads under `upload_dir`
    pub fn with_upload_dir(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            ..Default::default()
        }
    }

    /// Create config for development (uploads in the system temp directory)
    pub fn development() -> Self {
        Self::with_upload_dir(std::env::temp_dir().join("task-board-uploads"))
    }
}
