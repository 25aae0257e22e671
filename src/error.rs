//! Error types for the data connector.
//!
//! Every failure while talking to a caller's database collapses into
//! [`DbError::ExecutionFailed`]. The HTTP layer wraps it in [`ApiError`],
//! which decides the status code and the `{"detail": ...}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("{}", render_message(.message, .sql_state.as_deref()))]
    ExecutionFailed {
        message: String,
        /// e.g., "42601" for a syntax error
        sql_state: Option<String>,
    },
}

fn render_message(message: &str, sql_state: Option<&str>) -> String {
    match sql_state {
        Some(code) => format!("{} (SQLSTATE {})", message, code),
        None => message.to_string(),
    }
}

impl DbError {
    /// Create an execution error without a server error code.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
            sql_state: None,
        }
    }

    /// Create an execution error reported by the database server.
    pub fn database(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
            sql_state,
        }
    }

    /// SQLSTATE code, when the server reported one.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::ExecutionFailed { sql_state, .. } => sql_state.as_deref(),
        }
    }
}

/// Convert sqlx errors to DbError.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DbError::database(db_err.message(), code)
            }
            sqlx::Error::Configuration(msg) => {
                DbError::execution(format!("Invalid connection string: {}", msg))
            }
            sqlx::Error::PoolTimedOut => {
                DbError::execution("Timed out waiting for a database connection")
            }
            sqlx::Error::Io(io_err) => DbError::execution(format!("I/O error: {}", io_err)),
            sqlx::Error::Tls(tls_err) => DbError::execution(format!("TLS error: {}", tls_err)),
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::execution(format!("Failed to decode column {}: {}", index, source))
            }
            other => DbError::execution(other.to_string()),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors returned from HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The database operation failed. Rendered as 400.
    BadRequest { detail: String },
    /// The request parameters were missing or malformed. Rendered as 422.
    InvalidParams { detail: String },
}

impl ApiError {
    /// Wrap a database error, prefixing the message with what was attempted.
    pub fn execution(context: &str, err: &DbError) -> Self {
        Self::BadRequest {
            detail: format!("{}: {}", context, err),
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::InvalidParams {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidParams { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::BadRequest { detail } | Self::InvalidParams { detail } => detail,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_without_sql_state() {
        let err = DbError::execution("connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.sql_state(), None);
    }

    #[test]
    fn test_error_display_includes_sql_state() {
        let err = DbError::database(
            "syntax error at or near \"SELEC\"",
            Some("42601".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "syntax error at or near \"SELEC\" (SQLSTATE 42601)"
        );
        assert_eq!(err.sql_state(), Some("42601"));
    }

    #[test]
    fn test_pool_timeout_maps_to_execution_failed() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(err.to_string().contains("Timed out"));
    }

    #[test]
    fn test_io_error_maps_to_execution_failed() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: DbError = sqlx::Error::Io(io).into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_api_error_prefixes_context() {
        let err = ApiError::execution(
            "Error executing query",
            &DbError::execution("relation \"missing\" does not exist"),
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.detail(),
            "Error executing query: relation \"missing\" does not exist"
        );
    }

    #[test]
    fn test_invalid_params_maps_to_unprocessable() {
        let err = ApiError::invalid_params("missing field `query`");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_api_error_response_status() {
        let response = ApiError::execution("Error", &DbError::execution("boom")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
