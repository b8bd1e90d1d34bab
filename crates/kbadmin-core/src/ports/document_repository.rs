//! Document repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{IndexDocument, NewIndexDocument};

/// Repository for per-index document rows (`llm_index_docs`).
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// List all documents belonging to an index, oldest first.
    async fn list_for_index(&self, index_id: i64) -> Result<Vec<IndexDocument>, RepositoryError>;

    /// Insert a batch of documents, returning them with assigned IDs.
    ///
    /// The batch is inserted atomically: either all rows land or none do.
    async fn insert_many(
        &self,
        documents: &[NewIndexDocument],
    ) -> Result<Vec<IndexDocument>, RepositoryError>;

    /// Set the sync flag on a single document.
    async fn set_synced(&self, id: i64, synced: bool) -> Result<(), RepositoryError>;

    /// Set the sync flag on every document of an index.
    async fn set_synced_for_index(
        &self,
        index_id: i64,
        synced: bool,
    ) -> Result<(), RepositoryError>;

    /// Delete a batch of documents by ID. Missing IDs are ignored.
    async fn delete_many(&self, ids: &[i64]) -> Result<(), RepositoryError>;
}
