//! HTTP client for the bucket-based object-storage service.
//!
//! Implements the `ObjectStore` port from `kbadmin-core`. All index
//! documents live in one bucket, keyed `{index_name}/{file_name}`.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::StorageClient;
pub use config::{StorageConfig, DEFAULT_BUCKET};
pub use error::{StorageError, StorageResult};
