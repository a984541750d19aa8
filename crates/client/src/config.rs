//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PARTSGRID_API_BASE_URL` - Base URL of the marketplace REST API
//!   (default: the local development backend)
//! - `PARTSGRID_REQUEST_TIMEOUT_MS` - Request timeout ceiling in
//!   milliseconds (default: 45000). Exists so the timeout behaviour can be
//!   exercised in tests; production deployments leave it unset.
//! - `PARTSGRID_COOKIE_FILE` - Path for the persistent cookie jar used by
//!   the CLI (default: no persistence, in-memory jar only)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Development backend used when `PARTSGRID_API_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api/v1";

/// Fixed request timeout ceiling.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 45_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// PartsGrid client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the marketplace REST API.
    pub base_url: Url,
    /// Timeout applied to every outgoing request.
    pub request_timeout: Duration,
    /// Optional on-disk location for the cookie jar.
    pub cookie_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse. Unset
    /// variables fall back to defaults and never error.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("PARTSGRID_API_BASE_URL", DEFAULT_BASE_URL);
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("PARTSGRID_API_BASE_URL".to_string(), e.to_string())
        })?;

        let timeout_ms = get_env_or_default(
            "PARTSGRID_REQUEST_TIMEOUT_MS",
            &DEFAULT_REQUEST_TIMEOUT_MS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("PARTSGRID_REQUEST_TIMEOUT_MS".to_string(), e.to_string())
        })?;

        let cookie_file = get_optional_env("PARTSGRID_COOKIE_FILE").map(PathBuf::from);

        Ok(Self {
            base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            cookie_file,
        })
    }

    /// Build a configuration pointing at an explicit base URL, with the
    /// default timeout and no cookie persistence.
    #[must_use]
    pub const fn for_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            cookie_file: None,
        }
    }

    /// Override the request timeout (used by tests exercising the ceiling).
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_parses() {
        let url = Url::parse(DEFAULT_BASE_URL).unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_for_base_url_defaults() {
        let config = ClientConfig::for_base_url(Url::parse("https://api.example.com/v1").unwrap());
        assert_eq!(
            config.request_timeout,
            Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)
        );
        assert!(config.cookie_file.is_none());
    }

    #[test]
    fn test_with_request_timeout() {
        let config = ClientConfig::for_base_url(Url::parse("https://api.example.com/v1").unwrap())
            .with_request_timeout(Duration::from_millis(250));
        assert_eq!(config.request_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("PARTSGRID_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }
}
