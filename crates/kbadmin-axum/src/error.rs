//! Axum-specific error types and mappings.
//!
//! This module provides error types for the Axum adapter and mappings
//! from `CoreError` to HTTP status codes and response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kbadmin_core::{CoreError, RepositoryError, StoreError, VectorApiError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input). `field` names the offending form field
    /// when there is one, so the UI can render the error inline.
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        field: Option<String>,
    },

    /// Conflict (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An external collaborator (vector service) failed.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    /// Plain bad request with no associated field.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            field: None,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Form field the error is about, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, field) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            Self::BadRequest { message, field } => (StatusCode::BAD_REQUEST, message, field),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg, None),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            field,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::Store(store_err) => store_err.into(),
            CoreError::VectorApi(vector_err) => vector_err.into(),
            CoreError::Validation { field, message } => Self::BadRequest { message, field },
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::AlreadyExists(msg) => Self::Conflict(msg),
            RepositoryError::Storage(msg) => Self::Internal(format!("Database: {msg}")),
            RepositoryError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
            RepositoryError::Constraint(msg) => Self::BadRequest {
                message: msg,
                field: None,
            },
        }
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        Self::Internal(format!("Storage: {err}"))
    }
}

impl From<VectorApiError> for HttpError {
    fn from(err: VectorApiError) -> Self {
        Self::BadGateway(err.to_string())
    }
}
