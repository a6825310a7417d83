//! # API Configuration Module
//!
//! Loads settings for the MediSys API server from environment variables,
//! falling back to defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `BACKEND_URL`: Base URL of the hospital backend (default: "http://localhost:8090")
//! - `BACKEND_TIMEOUT_SECONDS`: Per-request timeout towards the backend (default: 15)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `CLINIC_TIMEZONE`: IANA zone the clinic's schedules are written in
//!   (falls back to `TZ`, then "UTC")

use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use medisys_client::ClientConfig;
use std::env;
use tracing::Level;

/// Configuration for the MediSys API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Connection settings for the hospital backend
    pub backend: ClientConfig,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Zone in which schedule wall-clock times are interpreted
    pub timezone: Tz,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// - `API_PORT` cannot be parsed as a u16
    /// - `BACKEND_TIMEOUT_SECONDS` is not a number
    /// - the configured clinic time zone is not a known IANA name
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let backend = ClientConfig::from_env()?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let timezone = resolve_timezone(
            env::var("CLINIC_TIMEZONE").ok().as_deref(),
            env::var("TZ").ok().as_deref(),
        )?;

        Ok(Self {
            host,
            port,
            backend,
            log_level,
            cors_origins,
            request_timeout,
            timezone,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_log_level(value: &str) -> Level {
    match value {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Picks the clinic zone: the explicit setting, else the process zone, else UTC.
///
/// Blank values count as unset. A name that is set but unknown is an error.
pub fn resolve_timezone(clinic: Option<&str>, process: Option<&str>) -> Result<Tz> {
    let name = [clinic, process]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty());

    match name {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|err| eyre::eyre!("Invalid clinic time zone {:?}: {}", name, err)),
        None => Ok(Tz::UTC),
    }
}
