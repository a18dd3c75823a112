//! Error conversions - From implementations for common error types
//!
//! Provides conversion from database errors to [`AppError`] and from
//! [`AppError`] to transport-level error shapes.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a sqlx error into an [`ErrorKind`] and a client-safe message
///
/// Crate errors that wrap `sqlx::Error` use this so that pool exhaustion
/// and an unreachable database surface as 503 rather than a generic 500.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx_error(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut => (
            ErrorKind::ServiceUnavailable,
            "Database connection pool exhausted",
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL specific error codes
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                // Class 23: Integrity Constraint Violation
                Some("23505") => (ErrorKind::Conflict, "Duplicate key value"),
                Some("23502") => (ErrorKind::BadRequest, "Required field is null"),
                Some("23514") => (ErrorKind::BadRequest, "Check constraint violation"),
                // Class 53: Insufficient Resources
                Some("53000" | "53100" | "53200" | "53300") => {
                    (ErrorKind::ServiceUnavailable, "Database resource exhausted")
                }
                // Class 57: Operator Intervention
                Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                    (ErrorKind::ServiceUnavailable, "Database unavailable")
                }
                _ => (ErrorKind::InternalServerError, "Database error"),
            }
        }
        sqlx::Error::Io(_) | sqlx::Error::PoolClosed => {
            (ErrorKind::ServiceUnavailable, "Database connection error")
        }
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx_error(&err);
        AppError::new(kind, message).with_source(err)
    }
}

/// Whether a sqlx error is a unique-constraint violation (`23505`)
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        if self.is_server_error() {
            tracing::error!(error = ?self, "Request failed with server error");
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "code": self.code(),
            "detail": self.public_message(),
        });

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// GraphQL conversions (feature-gated)
// ============================================================================

#[cfg(feature = "graphql")]
impl AppError {
    /// Convert into a GraphQL error carrying `code` and `statusCode` extensions
    pub fn into_graphql_error(self) -> async_graphql::Error {
        use async_graphql::ErrorExtensions;

        if self.is_server_error() {
            tracing::error!(error = ?self, "GraphQL resolver failed with server error");
        }

        let code = self.code().to_string();
        let status = i32::from(self.status_code());

        async_graphql::Error::new(self.public_message().to_string()).extend_with(|_, ext| {
            ext.set("code", code);
            ext.set("statusCode", status);
        })
    }
}

/// Converts domain results into GraphQL resolver results
#[cfg(feature = "graphql")]
pub trait GraphqlResultExt<T> {
    /// Map the error through [`AppError`] into a GraphQL error
    fn into_graphql(self) -> async_graphql::Result<T>;
}

#[cfg(feature = "graphql")]
impl<T, E> GraphqlResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn into_graphql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().into_graphql_error())
    }
}
