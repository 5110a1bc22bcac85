//! Configuration types for the WHOOP API client.

use crate::errors::{WhoopError, WhoopResult};
use crate::{
    DEFAULT_BACKOFF_BASE_SECS, DEFAULT_BACKOFF_MAX_SECS, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES,
    DEFAULT_TIMEOUT_SECS,
};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// Configuration for the WHOOP API client.
///
/// Immutable after construction and shared read-only by every concurrent
/// call; nothing here requires locking.
#[derive(Clone)]
pub struct WhoopConfig {
    /// Base URL for the WHOOP developer API.
    pub base_url: String,
    /// OAuth2 access token sent as `Authorization: Bearer <token>`.
    /// Requests are sent unauthenticated when absent.
    pub access_token: Option<SecretString>,
    /// Per-request transport timeout.
    pub timeout: Duration,
    /// Maximum number of retries after an HTTP 429 response.
    pub max_retries: u32,
    /// Base duration for exponential retry backoff.
    pub backoff_base: Duration,
    /// Ceiling for exponential retry backoff.
    pub backoff_max: Duration,
    /// Whether the local token-bucket rate limiter is enforced.
    pub rate_limiting: bool,
}

impl WhoopConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> WhoopConfigBuilder {
        WhoopConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads `WHOOP_ACCESS_TOKEN`, `WHOOP_BASE_URL`, `WHOOP_TIMEOUT`
    /// (seconds), and `WHOOP_MAX_RETRIES`; unset variables fall back to
    /// defaults.
    pub fn from_env() -> WhoopResult<Self> {
        let mut builder = Self::builder();

        if let Ok(token) = std::env::var("WHOOP_ACCESS_TOKEN") {
            builder = builder.access_token(token);
        }
        if let Ok(base_url) = std::env::var("WHOOP_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = std::env::var("WHOOP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = std::env::var("WHOOP_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            builder = builder.max_retries(retries);
        }

        builder.build()
    }
}

impl std::fmt::Debug for WhoopConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhoopConfig")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff_base", &self.backoff_base)
            .field("backoff_max", &self.backoff_max)
            .field("rate_limiting", &self.rate_limiting)
            .finish()
    }
}

/// Builder for [`WhoopConfig`].
#[derive(Default)]
pub struct WhoopConfigBuilder {
    base_url: Option<String>,
    access_token: Option<SecretString>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    backoff_base: Option<Duration>,
    backoff_max: Option<Duration>,
    rate_limiting: Option<bool>,
}

impl WhoopConfigBuilder {
    /// Sets the OAuth2 access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::new(token.into()));
        self
    }

    /// Overrides the default API base URL. Primarily useful for tests and
    /// proxies.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the per-request transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of retries on HTTP 429.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the base duration for exponential backoff.
    pub fn backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = Some(base);
        self
    }

    /// Sets the ceiling for exponential backoff.
    pub fn backoff_max(mut self, max: Duration) -> Self {
        self.backoff_max = Some(max);
        self
    }

    /// Enables or disables the local rate limiter.
    pub fn rate_limiting(mut self, enabled: bool) -> Self {
        self.rate_limiting = Some(enabled);
        self
    }

    /// Builds the configuration, validating the base URL.
    pub fn build(self) -> WhoopResult<WhoopConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url).map_err(|e| WhoopError::Configuration {
            message: format!("invalid base URL {base_url:?}: {e}"),
        })?;

        Ok(WhoopConfig {
            base_url,
            access_token: self.access_token,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            backoff_base: self
                .backoff_base
                .unwrap_or(Duration::from_secs(DEFAULT_BACKOFF_BASE_SECS)),
            backoff_max: self
                .backoff_max
                .unwrap_or(Duration::from_secs(DEFAULT_BACKOFF_MAX_SECS)),
            rate_limiting: self.rate_limiting.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = WhoopConfig::builder().build().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.access_token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_base, Duration::from_secs(1));
        assert_eq!(config.backoff_max, Duration::from_secs(60));
        assert!(config.rate_limiting);
    }

    #[test]
    fn test_builder_custom() {
        let config = WhoopConfig::builder()
            .access_token("token-123")
            .base_url("https://localhost:8080/v1")
            .timeout(Duration::from_secs(5))
            .max_retries(1)
            .backoff_base(Duration::from_millis(10))
            .backoff_max(Duration::from_millis(50))
            .rate_limiting(false)
            .build()
            .unwrap();

        assert!(config.access_token.is_some());
        assert_eq!(config.base_url, "https://localhost:8080/v1");
        assert_eq!(config.max_retries, 1);
        assert!(!config.rate_limiting);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = WhoopConfig::builder().base_url("not a url").build();
        assert!(matches!(result, Err(WhoopError::Configuration { .. })));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = WhoopConfig::builder()
            .access_token("super-secret")
            .build()
            .unwrap();
        let output = format!("{config:?}");
        assert!(!output.contains("super-secret"));
        assert!(output.contains("REDACTED"));
    }
}
