//! Parsing of ids received over the wire
//!
//! A blank id is a validation error. A non-UUID id cannot match any stored
//! entity and is reported with the same not-found error as a missing one.

use kernel::id::{FileId, TaskId};

use crate::error::{TaskError, TaskResult};

pub(crate) fn parse_task_id(raw: &str) -> TaskResult<TaskId> {
    parse_task_id_or(raw, |raw| format!("Task with id {raw} not found"))
}

pub(crate) fn parse_task_id_or(
    raw: &str,
    not_found: impl FnOnce(&str) -> String,
) -> TaskResult<TaskId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TaskError::validation("Task ID is required"));
    }
    TaskId::parse_str(raw).map_err(|_| TaskError::NotFound(not_found(raw)))
}

pub(crate) fn parse_file_id(raw: &str) -> TaskResult<FileId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TaskError::validation("File ID is required"));
    }
    FileId::parse_str(raw).map_err(|_| TaskError::not_found("File not found"))
}
