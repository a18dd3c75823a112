//! Upload Value Objects
//!
//! Validation of attachment metadata before anything is written to storage.

use crate::error::{TaskError, TaskResult};

/// Maximum attachment size (5 MiB)
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// MIME types accepted for attachments
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "text/plain",
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/gif",
];

/// Original file name as supplied by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName(String);

impl FileName {
    pub fn new(raw: impl Into<String>) -> TaskResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TaskError::validation("Filename cannot be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Allow-listed MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeType(String);

impl MimeType {
    pub fn new(raw: impl Into<String>) -> TaskResult<Self> {
        let raw = raw.into();
        if !ALLOWED_MIME_TYPES.contains(&raw.as_str()) {
            return Err(TaskError::validation("File type not allowed"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Attachment size in bytes, `0 < size <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSize(u64);

impl FileSize {
    pub fn new(bytes: u64, max: u64) -> TaskResult<Self> {
        if bytes == 0 || bytes > max {
            return Err(TaskError::validation("Invalid file size"));
        }
        Ok(Self(bytes))
    }

    pub fn bytes(&self) -> u64 {
        self.0
    }
}
