//! Ownership checks
//!
//! Single gate for "caller must own the task" rules across task and file
//! operations. The check runs against the snapshot the caller just read; a
//! concurrent ownership change between read and write is not detected.

use kernel::id::UserId;

use crate::error::{TaskError, TaskResult};

/// Operation that requires task ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedAction {
    UpdateTask,
    DeleteTask,
    UploadFile,
    DeleteFile,
}

impl OwnedAction {
    /// Message reported to a caller who is not the owner
    pub fn message(&self) -> &'static str {
        match self {
            OwnedAction::UpdateTask => "You can only update your own tasks",
            OwnedAction::DeleteTask => "You can only delete your own tasks",
            OwnedAction::UploadFile => "Not authorized to upload to this task",
            OwnedAction::DeleteFile => "Not authorized to delete this file",
        }
    }
}

pub fn require_owner(owner: &UserId, caller: &UserId, action: OwnedAction) -> TaskResult<()> {
    if owner == caller {
        return Ok(());
    }

    tracing::warn!(
        owner_id = %owner,
        caller_id = %caller,
        action = ?action,
        "Ownership check failed"
    );
    Err(TaskError::NotOwner(action))
}
