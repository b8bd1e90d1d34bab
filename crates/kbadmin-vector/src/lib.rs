//! HTTP client for the external vector-index service.
//!
//! Implements the `VectorIndexClient` port from `kbadmin-core` against the
//! service's four endpoints (`/create_kb`, `/add_docs`, `/list-index`,
//! `/remove_index`). The HTTP layer is abstracted behind `HttpBackend` so
//! tests can run against canned responses.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;

pub use client::{DefaultVectorClient, VectorClient};
pub use config::VectorApiConfig;
pub use error::{VectorError, VectorResult};
