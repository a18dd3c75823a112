//! Task Error Types
//!
//! Task- and file-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_sqlx_error;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::ownership::OwnedAction;

/// Task-specific result type alias
pub type TaskResult<T> = Result<T, TaskError>;

/// Task-specific error variants
#[derive(Debug, Error)]
pub enum TaskError {
    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    /// Task or file does not exist
    #[error("{0}")]
    NotFound(String),

    /// Caller does not own the task
    #[error("{}", .0.message())]
    NotOwner(OwnedAction),

    /// File storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskError {
    pub fn validation(message: impl Into<String>) -> Self {
        TaskError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        TaskError::NotFound(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::Validation(_) => ErrorKind::BadRequest,
            TaskError::NotFound(_) => ErrorKind::NotFound,
            TaskError::NotOwner(_) => ErrorKind::Unauthorized,
            TaskError::Database(e) => classify_sqlx_error(e).0,
            TaskError::Storage(_) | TaskError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            TaskError::Database(e) => {
                let (kind, message) = classify_sqlx_error(e);
                AppError::new(kind, message)
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TaskError::Database(e) => {
                tracing::error!(error = %e, "Task database error");
            }
            TaskError::Storage(e) => {
                tracing::error!(error = %e, "File storage error");
            }
            TaskError::Internal(msg) => {
                tracing::error!(message = %msg, "Task internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Task error");
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        let app = err.to_app_error();
        match err {
            TaskError::Database(e) => AppError::from(e),
            TaskError::Storage(e) => app.with_source(e),
            _ => app,
        }
    }
}
