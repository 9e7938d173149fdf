//! Error types for satchel-api and their HTTP mapping.
//!
//! The taxonomy is small: missing input is 400, authorization failure is 401,
//! not-found is 404, and every other failure is a 500 with a generic body —
//! the original error is logged server-side only.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Result type alias for satchel-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in satchel-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required configuration value is missing or malformed.
    #[error("configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// Error from satchel-core (merge join, class validation).
    #[error(transparent)]
    Core(#[from] satchel_core::Error),

    /// Error from satchel-ingest.
    #[error("ingest error: {0}")]
    Ingest(#[from] satchel_ingest::Error),

    /// Error from satchel-store.
    #[error("storage error: {0}")]
    Store(#[from] satchel_store::Error),

    /// Error from satchel-report.
    #[error("report error: {0}")]
    Report(#[from] satchel_report::Error),

    /// Error from satchel-auth.
    #[error("auth error: {0}")]
    Auth(#[from] satchel_auth::AuthError),

    /// An upload arrived without one of its two file fields.
    #[error("missing upload field '{field}'")]
    MissingFile {
        /// The multipart field name that was absent.
        field: &'static str,
    },

    /// No record matched the request.
    #[error("not found")]
    NotFound,

    /// I/O error (upload spooling).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The multipart stream could not be read.
    #[error("multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// A blocking task failed to complete.
    #[error("task failure: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingFile { .. } | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::Core(satchel_core::Error::InvalidClassId { .. }) => StatusCode::BAD_REQUEST,
            Error::Auth(e) if e.is_client_error() => StatusCode::UNAUTHORIZED,
            Error::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
            "error processing request".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": { "message": message } }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_auth::AuthError;

    #[test]
    fn test_missing_file_is_400() {
        let e = Error::MissingFile { field: "studentInfo" };
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_class_is_400() {
        let e = Error::Core(satchel_core::Error::InvalidClassId {
            value: "bad/class".to_string(),
        });
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_client_error_is_401() {
        assert_eq!(
            Error::Auth(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::Auth(AuthError::Expired).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_auth_server_error_is_500() {
        assert_eq!(
            Error::Auth(AuthError::Signing("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_is_404() {
        assert_eq!(Error::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_processing_failures_are_500() {
        let e = Error::Core(satchel_core::Error::MissingColumn {
            column: "Roll",
            row: 1,
        });
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
