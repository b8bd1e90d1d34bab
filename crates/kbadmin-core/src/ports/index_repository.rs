//! Index repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{DocIndex, NewDocIndex};

/// Repository for index persistence operations.
///
/// CRUD over `llm_index` rows. Implementations are responsible for all
/// storage details; deleting an index must cascade to its documents.
#[async_trait]
pub trait IndexRepository: Send + Sync {
    /// List all indices, newest first.
    async fn list(&self) -> Result<Vec<DocIndex>, RepositoryError>;

    /// Get an index by its database ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the index doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<DocIndex, RepositoryError>;

    /// Get an index by its unique name.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no index with that name exists.
    async fn get_by_name(&self, name: &str) -> Result<DocIndex, RepositoryError>;

    /// Insert a new index.
    ///
    /// Returns the persisted index with its assigned ID.
    /// Returns `Err(RepositoryError::AlreadyExists)` if an index with the
    /// same name already exists.
    async fn insert(&self, index: &NewDocIndex) -> Result<DocIndex, RepositoryError>;

    /// Set the sync flag on an index.
    async fn set_synced(&self, id: i64, synced: bool) -> Result<(), RepositoryError>;

    /// Delete an index by ID, cascading to its documents.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the index doesn't exist.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
