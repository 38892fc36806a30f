//! Error types for the REST API.
//!
//! This module defines the REST-layer error type and its conversion from
//! store errors, with automatic mapping to HTTP responses. Every error body
//! has the same shape: `{ "error": message }`.
//!
//! # Error Mapping
//!
//! | Store Error | HTTP Status |
//! |-------------|-------------|
//! | NotFound, UnknownCollection | 404 |
//! | AlreadyExists | 400 |
//! | ValidationError | 400 |
//! | QueryError | 400 |
//! | BackendError | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use atrium_store::error::{StoreError, ValidationError};

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The URL names a resource type the registry does not know (HTTP 404).
    #[error("unknown resource type: {resource}")]
    UnknownResource {
        /// The path segment that did not resolve.
        resource: String,
    },

    /// The requested record does not exist (HTTP 404).
    #[error("{resource}/{id} not found")]
    NotFound {
        /// The resource type.
        resource: String,
        /// The record id.
        id: String,
    },

    /// The request body or parameters failed validation (HTTP 400).
    #[error("{0}")]
    Validation(String),

    /// The request is missing or carries an invalid bearer token (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// An internal failure (HTTP 500). The message is logged, not returned.
    #[error("internal server error")]
    Internal(String),
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::UnknownResource { .. } | RestError::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::Unauthorized => StatusCode::UNAUTHORIZED,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        use atrium_store::error::ResourceError;

        match err {
            StoreError::Resource(ResourceError::NotFound { collection, id }) => {
                RestError::NotFound {
                    resource: collection,
                    id,
                }
            }
            StoreError::Resource(ResourceError::UnknownCollection { collection }) => {
                RestError::UnknownResource {
                    resource: collection,
                }
            }
            StoreError::Resource(err @ ResourceError::AlreadyExists { .. }) => {
                RestError::Validation(err.to_string())
            }
            StoreError::Validation(err) => RestError::Validation(err.to_string()),
            StoreError::Query(err) => RestError::Validation(err.to_string()),
            StoreError::Backend(err) => RestError::Internal(err.to_string()),
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::Validation(err.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details go to the log, not the client.
        let message = match &self {
            RestError::Internal(detail) => {
                error!(detail = %detail, "internal server error");
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(serde_json::json!({ "error": message }));
        (status, body).into_response()
    }
}
