//! Public configuration for the object-storage client.

use std::time::Duration;

/// Default bucket holding all index documents.
pub const DEFAULT_BUCKET: &str = "llm_docs";

/// Configuration for the object-storage client.
///
/// `base_url` points at the storage API root (the segment before
/// `/object/...`), e.g. `https://project.example.co/storage/v1`.
///
/// # Example
///
/// ```
/// use kbadmin_storage::StorageConfig;
///
/// let config = StorageConfig::new("https://project.example.co/storage/v1")
///     .with_service_key("secret")
///     .with_bucket("llm_docs");
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage API
    pub(crate) base_url: String,
    /// Service key sent as a bearer token
    pub(crate) service_key: Option<String>,
    /// Bucket all object paths are relative to
    pub(crate) bucket: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl StorageConfig {
    /// Create a new configuration pointing at the given storage API root.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_key: None,
            bucket: DEFAULT_BUCKET.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: concat!("kbadmin-storage/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the service key used for bearer authentication.
    #[must_use]
    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = Some(key.into());
        self
    }

    /// Set an optional service key.
    #[must_use]
    pub fn with_optional_service_key(mut self, key: Option<String>) -> Self {
        self.service_key = key;
        self
    }

    /// Set the bucket name. Defaults to `llm_docs`.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 60 seconds; uploads carry whole documents.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
