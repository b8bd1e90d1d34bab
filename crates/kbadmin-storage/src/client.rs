//! Object-storage client implementing the `ObjectStore` port.
//!
//! Talks to a bucket-based storage REST API: objects live under
//! `/object/{bucket}/{path}`, signing under `/object/sign/...`, listing
//! under `/object/list/{bucket}`.

use async_trait::async_trait;
use url::Url;

use kbadmin_core::{ObjectStore, StoreError, StoredObject};

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::models::{ListRequest, ListedObject, RemoveRequest, SignRequest, SignResponse};

/// Listing page size. Indices hold at most a few dozen documents.
const LIST_LIMIT: u32 = 1000;

/// Production object-storage client.
pub struct StorageClient {
    client: reqwest::Client,
    base_url: Url,
    bucket: String,
    service_key: Option<String>,
}

impl StorageClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            bucket: config.bucket.clone(),
            service_key: config.service_key.clone(),
        })
    }

    fn api_url(&self, route: &str) -> StorageResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{route}"))?)
    }

    fn object_route(&self, action: &str, path: &str) -> String {
        let encoded = encode_path(path);
        if action.is_empty() {
            format!("object/{}/{}", self.bucket, encoded)
        } else {
            format!("object/{action}/{}/{}", self.bucket, encoded)
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.service_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    async fn check_status(
        path: &str,
        response: reqwest::Response,
    ) -> StorageResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(StorageError::RequestFailed {
            status: status.as_u16(),
            path: path.to_string(),
        })
    }

    /// Turn the relative signed URL from a sign response into an absolute one.
    fn absolute_signed_url(&self, signed: &str) -> String {
        if signed.starts_with("http://") || signed.starts_with("https://") {
            return signed.to_string();
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/{}", signed.trim_start_matches('/'))
    }
}

/// Percent-encode each path segment, keeping the `/` separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        let url = self
            .api_url(&self.object_route("", path))
            .map_err(StoreError::from)?;

        tracing::debug!(path, bytes = bytes.len(), "uploading object");
        let response = self
            .authorized(self.client.post(url.as_str()))
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(StorageError::from)?;
        Self::check_status(path, response)
            .await
            .map_err(StoreError::from)?;
        Ok(())
    }

    async fn signed_url(&self, path: &str, expires_in_secs: u64) -> Result<String, StoreError> {
        let url = self
            .api_url(&self.object_route("sign", path))
            .map_err(StoreError::from)?;

        let response = self
            .authorized(self.client.post(url.as_str()))
            .json(&SignRequest {
                expires_in: expires_in_secs,
            })
            .send()
            .await
            .map_err(StorageError::from)?;
        let response = Self::check_status(path, response)
            .await
            .map_err(StoreError::from)?;
        let body: SignResponse = response
            .json()
            .await
            .map_err(StorageError::from)
            .map_err(StoreError::from)?;
        Ok(self.absolute_signed_url(&body.signed_url))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>, StoreError> {
        let url = self
            .api_url(&format!("object/list/{}", self.bucket))
            .map_err(StoreError::from)?;

        let response = self
            .authorized(self.client.post(url.as_str()))
            .json(&ListRequest {
                prefix: prefix.to_string(),
                limit: LIST_LIMIT,
                offset: 0,
            })
            .send()
            .await
            .map_err(StorageError::from)?;
        let response = Self::check_status(prefix, response)
            .await
            .map_err(StoreError::from)?;
        let entries: Vec<ListedObject> = response
            .json()
            .await
            .map_err(StorageError::from)
            .map_err(StoreError::from)?;

        Ok(entries
            .into_iter()
            .map(|entry| StoredObject {
                size: entry.metadata.and_then(|m| m.size),
                name: entry.name,
            })
            .collect())
    }

    async fn remove(&self, paths: &[String]) -> Result<(), StoreError> {
        if paths.is_empty() {
            return Ok(());
        }
        let url = self
            .api_url(&format!("object/{}", self.bucket))
            .map_err(StoreError::from)?;

        tracing::debug!(count = paths.len(), "removing objects");
        let response = self
            .authorized(self.client.delete(url.as_str()))
            .json(&RemoveRequest {
                prefixes: paths.to_vec(),
            })
            .send()
            .await
            .map_err(StorageError::from)?;
        Self::check_status(&paths.join(", "), response)
            .await
            .map_err(StoreError::from)?;
        Ok(())
    }
}
