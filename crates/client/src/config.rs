use eyre::{Result, WrapErr};
use std::env;

/// Connection settings for the hospital backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST API, without a trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            timeout_seconds: 15,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `BACKEND_URL` (default: "http://localhost:8090")
    /// - `BACKEND_TIMEOUT_SECONDS` (default: 15)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = env::var("BACKEND_URL").unwrap_or(defaults.base_url);

        let timeout_seconds = match env::var("BACKEND_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse()
                .wrap_err("Invalid BACKEND_TIMEOUT_SECONDS value")?,
            Err(_) => defaults.timeout_seconds,
        };

        Ok(Self {
            timeout_seconds,
            ..Self::new(base_url)
        })
    }
}
