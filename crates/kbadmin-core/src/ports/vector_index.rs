//! Vector-index service port definition.

use async_trait::async_trait;

use super::VectorApiError;

/// Client for the external vector-index service.
///
/// The service ingests documents by URL into a named index and can list or
/// remove indices. Every call is a remote HTTP request; none are retried.
#[async_trait]
pub trait VectorIndexClient: Send + Sync {
    /// Create a named index and ingest the given document URLs into it.
    async fn create_index(
        &self,
        index_name: &str,
        document_urls: &[String],
    ) -> Result<(), VectorApiError>;

    /// Ingest one additional document URL into an existing index.
    async fn add_document(&self, index_name: &str, document_url: &str)
        -> Result<(), VectorApiError>;

    /// List the names of all indices the service knows about.
    async fn list_indices(&self) -> Result<Vec<String>, VectorApiError>;

    /// Remove a named index and everything ingested into it.
    async fn remove_index(&self, index_name: &str) -> Result<(), VectorApiError>;
}
