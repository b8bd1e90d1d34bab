//! Error types for the object-storage client.

use thiserror::Error;

use kbadmin_core::StoreError;

/// Result alias used throughout this crate.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors the object-storage client can produce.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage API rejected a request with an HTTP error status.
    #[error("storage request failed with status {status}: {path}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Object path or prefix the request was about
        path: String,
    },

    /// Network-level failure from the HTTP client.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a body we could not interpret.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Description of what was wrong with the response
        message: String,
    },
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse {
            message: e.to_string(),
        }
    }
}

impl From<url::ParseError> for StorageError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidResponse {
            message: format!("invalid URL: {e}"),
        }
    }
}

/// Conversion to the core port error, applied at the trait boundary so the
/// rest of the application never sees reqwest types.
impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::RequestFailed { status, path } => Self::RequestFailed { status, path },
            StorageError::Network(inner) => Self::Network(inner.to_string()),
            StorageError::InvalidResponse { message } => Self::InvalidResponse(message),
        }
    }
}
