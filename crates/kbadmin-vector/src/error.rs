//! Error types for the vector-index client.

use thiserror::Error;

use kbadmin_core::VectorApiError;

/// Result alias used throughout this crate.
pub type VectorResult<T> = Result<T, VectorError>;

/// Errors the vector-index client can produce.
#[derive(Debug, Error)]
pub enum VectorError {
    /// The API rejected a request with an HTTP error status.
    #[error("vector API request failed with status {status}: {endpoint}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Endpoint path the request was sent to
        endpoint: String,
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

impl From<serde_json::Error> for VectorError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse {
            message: e.to_string(),
        }
    }
}

impl From<url::ParseError> for VectorError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidResponse {
            message: format!("invalid URL: {e}"),
        }
    }
}

/// Conversion to the core port error, applied at the trait boundary so the
/// rest of the application never sees reqwest types.
impl From<VectorError> for VectorApiError {
    fn from(e: VectorError) -> Self {
        match e {
            VectorError::RequestFailed { status, endpoint } => {
                Self::RequestFailed { status, endpoint }
            }
            VectorError::Network(inner) => Self::Network(inner.to_string()),
            VectorError::InvalidResponse { message } => Self::InvalidResponse(message),
        }
    }
}
