//! Data Transfer Objects

use serde::Serialize;

use crate::domain::entity::File;

/// Response body for `POST /upload`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub id: String,
    pub filename: String,
    pub mimetype: String,
    pub size: u64,
    pub task_id: String,
}

impl From<File> for UploadResponse {
    fn from(file: File) -> Self {
        Self {
            id: file.file_id.to_string(),
            filename: file.filename,
            mimetype: file.mimetype,
            size: file.size,
            task_id: file.task_id.to_string(),
        }
    }
}
