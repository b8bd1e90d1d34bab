//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repository traits are minimal and CRUD-focused
//! - Remote-service traits are intent-based (upload, sign, ingest, remove)

pub mod document_repository;
pub mod index_repository;
pub mod object_store;
pub mod template_repository;
pub mod vector_index;

use std::sync::Arc;
use thiserror::Error;

pub use document_repository::DocumentRepository;
pub use index_repository::IndexRepository;
pub use object_store::{ObjectStore, StoredObject};
pub use template_repository::TemplateRepository;
pub use vector_index::VectorIndexClient;

/// Container for all repository trait objects.
///
/// Provides a consistent way to wire repositories across adapters without
/// coupling them to concrete implementations. It lives in `kbadmin-core` so
/// that services can accept it without depending on `kbadmin-db`.
#[derive(Clone)]
pub struct Repos {
    /// Index repository for CRUD operations on `llm_index` rows.
    pub indices: Arc<dyn IndexRepository>,
    /// Document repository for per-index document rows.
    pub documents: Arc<dyn DocumentRepository>,
    /// Search template repository.
    pub templates: Arc<dyn TemplateRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        indices: Arc<dyn IndexRepository>,
        documents: Arc<dyn DocumentRepository>,
        templates: Arc<dyn TemplateRepository>,
    ) -> Self {
        Self {
            indices,
            documents,
            templates,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// Abstracts away storage implementation details (e.g. sqlx errors) and
/// provides a clean interface for services to handle database failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g. foreign key, unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Errors from the object-storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage API rejected a request with an HTTP error status.
    #[error("Storage request failed with status {status}: {path}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Object path or prefix the request was about
        path: String,
    },

    /// Network or HTTP client failure.
    #[error("Storage network error: {0}")]
    Network(String),

    /// The storage API returned a response we could not interpret.
    #[error("Invalid response from storage: {0}")]
    InvalidResponse(String),
}

/// Errors from the vector-index service.
#[derive(Debug, Error)]
pub enum VectorApiError {
    /// The vector API rejected a request with an HTTP error status.
    #[error("Vector API request failed with status {status}: {endpoint}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Endpoint path the request was sent to
        endpoint: String,
    },

    /// Network or HTTP client failure.
    #[error("Vector API network error: {0}")]
    Network(String),

    /// The vector API returned a response we could not interpret.
    #[error("Invalid response from vector API: {0}")]
    InvalidResponse(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the workflow services.
/// Adapters map it to their own error types (HTTP status codes, CLI exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Object-storage operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Vector API operation failed.
    #[error(transparent)]
    VectorApi(#[from] VectorApiError),

    /// Validation error (invalid input). `field` names the offending form
    /// field when there is one, so the UI can render the error inline.
    #[error("Validation error: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Validation error attached to a specific form field.
    pub fn field_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Validation error with no associated field.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }
}
