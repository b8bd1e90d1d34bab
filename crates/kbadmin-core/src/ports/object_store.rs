//! Object storage port definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StoreError;

/// An object listed under a storage prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    /// Object name relative to the listed prefix.
    pub name: String,
    /// Object size in bytes, when the backend reports it.
    pub size: Option<u64>,
}

/// Client for the object-storage collaborator, scoped to one bucket.
///
/// Paths are bucket-relative and folder-keyed by index name
/// (`{index_name}/{file_name}`).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload an object, replacing any existing object at the same path.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// Issue a time-limited signed URL granting read access to an object.
    async fn signed_url(&self, path: &str, expires_in_secs: u64) -> Result<String, StoreError>;

    /// List objects under a prefix (non-recursive, folder semantics).
    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>, StoreError>;

    /// Remove the objects at the given paths. Missing paths are ignored.
    async fn remove(&self, paths: &[String]) -> Result<(), StoreError>;
}
