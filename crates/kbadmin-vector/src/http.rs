//! HTTP backend abstraction for the vector-index service.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest. Requests are never retried: ingestion is not idempotent,
//! and the workflows in `kbadmin-core` handle failures by compensating.

use crate::config::VectorApiConfig;
use crate::error::{VectorError, VectorResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

/// Trait for HTTP backends that can exchange JSON with the service.
///
/// This is an implementation detail - external code should use the
/// `VectorIndexClient` trait from `kbadmin-core`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> VectorResult<T>;

    /// POST a JSON body, succeeding on any 2xx status.
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> VectorResult<()>;
}

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &VectorApiConfig) -> VectorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }

    /// Attach the raw `Authorization` header when a key is configured.
    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", key),
            None => request,
        }
    }

    async fn check_status(url: &Url, response: reqwest::Response) -> VectorResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(VectorError::RequestFailed {
            status: status.as_u16(),
            endpoint: url.path().to_string(),
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> VectorResult<T> {
        let response = self.authorized(self.client.get(url.as_str())).send().await?;
        let response = Self::check_status(url, response).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> VectorResult<()> {
        let response = self
            .authorized(self.client.post(url.as_str()))
            .json(body)
            .send()
            .await?;
        Self::check_status(url, response).await?;
        Ok(())
    }
}
