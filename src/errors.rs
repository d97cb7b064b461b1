//! Unified error type for the catalog backend.
//!
//! Every fallible operation in the crate returns [`Result`]. The error
//! taxonomy maps onto HTTP responses in one place ([`IntoResponse`]):
//! validation and conflict failures carry field-level detail, authorization
//! failures are distinct from not-found, and everything else collapses into
//! a generic 500 after being logged.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// All the ways a catalog operation can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// A field in an incoming payload is malformed or out of range.
    #[error("validation failed on {field}: {message}")]
    Validation {
        /// Name of the offending field, as it appears on the wire
        field: String,
        /// Human-readable description of the constraint
        message: String,
    },

    /// A uniqueness constraint would be violated (category slug,
    /// plan product/duration pair).
    #[error("conflict: {message}")]
    Conflict {
        /// Description of the conflicting constraint
        message: String,
    },

    /// The request carries no usable credentials.
    #[error("authentication required")]
    Unauthorized,

    /// The request is authenticated but the principal is not staff.
    #[error("staff access required")]
    Forbidden,

    /// The addressed row does not exist (or is invisible to the caller).
    #[error("{what} not found")]
    NotFound {
        /// What was being looked up (e.g. "product")
        what: String,
    },

    /// Startup configuration problem (missing environment variable, etc.)
    #[error("configuration error: {message}")]
    Config {
        /// Description of what is missing or malformed
        message: String,
    },

    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Bearer token could not be decoded or verified.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// I/O error (socket bind, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with owned strings.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`].
    pub fn not_found(what: &str) -> Self {
        Self::NotFound {
            what: what.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { field, message } => {
                // DRF-style field-level detail: {"field": ["message"]}
                let mut map = serde_json::Map::new();
                map.insert(field.clone(), json!([message]));
                (StatusCode::BAD_REQUEST, serde_json::Value::Object(map))
            }
            Self::Conflict { message } => (StatusCode::CONFLICT, json!({ "detail": message })),
            Self::Unauthorized | Self::Token(_) => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "Authentication credentials were not provided or are invalid." }),
            ),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "detail": "You do not have permission to perform this action." }),
            ),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, json!({ "detail": "Not found." })),
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                tracing::error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
