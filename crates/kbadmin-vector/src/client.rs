//! Vector-index service client.

use async_trait::async_trait;
use url::Url;

use kbadmin_core::{VectorApiError, VectorIndexClient};

use crate::config::VectorApiConfig;
use crate::error::{VectorError, VectorResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{AddDocsRequest, CreateKbRequest, IndexListResponse, RemoveIndexRequest};

/// Client for the vector-index service, generic over the HTTP backend.
pub struct VectorClient<B: HttpBackend> {
    backend: B,
    base_url: Url,
}

/// The production client type.
pub type DefaultVectorClient = VectorClient<ReqwestBackend>;

impl DefaultVectorClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &VectorApiConfig) -> VectorResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self { backend, base_url })
    }
}

impl<B: HttpBackend> VectorClient<B> {
    /// Create a client with an explicit backend. Used by tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_backend(base_url: &str, backend: B) -> VectorResult<Self> {
        Ok(Self {
            backend,
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> VectorResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

#[async_trait]
impl<B: HttpBackend> VectorIndexClient for VectorClient<B> {
    async fn create_index(
        &self,
        index_name: &str,
        document_urls: &[String],
    ) -> Result<(), VectorApiError> {
        let url = self.endpoint("create_kb")?;
        let body = serde_json::to_value(CreateKbRequest {
            indexname: index_name.to_string(),
            urls: document_urls.to_vec(),
        })
        .map_err(VectorError::from)?;

        tracing::debug!(index = index_name, urls = document_urls.len(), "POST /create_kb");
        self.backend.post_json(&url, &body).await?;
        Ok(())
    }

    async fn add_document(
        &self,
        index_name: &str,
        document_url: &str,
    ) -> Result<(), VectorApiError> {
        let url = self.endpoint("add_docs")?;
        let body = serde_json::to_value(AddDocsRequest {
            indexname: index_name.to_string(),
            url: document_url.to_string(),
        })
        .map_err(VectorError::from)?;

        tracing::debug!(index = index_name, "POST /add_docs");
        self.backend.post_json(&url, &body).await?;
        Ok(())
    }

    async fn list_indices(&self) -> Result<Vec<String>, VectorApiError> {
        let url = self.endpoint("list-index")?;
        let response: IndexListResponse = self.backend.get_json(&url).await?;
        if response.status != "OK" {
            return Err(VectorApiError::InvalidResponse(format!(
                "listing returned status '{}'",
                response.status
            )));
        }
        Ok(response.indexlist)
    }

    async fn remove_index(&self, index_name: &str) -> Result<(), VectorApiError> {
        let url = self.endpoint("remove_index")?;
        let body = serde_json::to_value(RemoveIndexRequest {
            indexname: index_name.to_string(),
        })
        .map_err(VectorError::from)?;

        tracing::debug!(index = index_name, "POST /remove_index");
        self.backend.post_json(&url, &body).await?;
        Ok(())
    }
}
