//! Public configuration for the vector-index client.

use std::time::Duration;

/// Configuration for the vector-index client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use kbadmin_vector::VectorApiConfig;
/// use std::time::Duration;
///
/// let config = VectorApiConfig::new("https://vectors.internal.example")
///     .with_timeout(Duration::from_secs(60))
///     .with_api_key("secret");
/// ```
#[derive(Debug, Clone)]
pub struct VectorApiConfig {
    /// Base URL of the vector-index service
    pub(crate) base_url: String,
    /// Raw `Authorization` header value, when the service requires one
    pub(crate) api_key: Option<String>,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl VectorApiConfig {
    /// Create a new configuration pointing at the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
            user_agent: concat!("kbadmin-vector/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the raw `Authorization` header value. The service expects the key
    /// as-is, with no `Bearer` prefix.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional `Authorization` header value.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds. Ingestion of large documents can take a
    /// while, so entry points may want to raise this.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VectorApiConfig::new("https://vectors.test");
        assert_eq!(config.base_url, "https://vectors.test");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.contains("kbadmin-vector"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = VectorApiConfig::new("https://vectors.test")
            .with_api_key("secret")
            .with_timeout(Duration::from_secs(120))
            .with_user_agent("test-agent");

        assert_eq!(config.api_key, Some("secret".to_string()));
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.user_agent, "test-agent");
    }
}
