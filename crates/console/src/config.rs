//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `WISHLIST_API_URL` - Base URL of the wishlist REST service
//!   (default: `http://localhost:8080/api`)
//! - `WISHLIST_LOG_FORMAT` - `text` or `json` (default: `text`)

use thiserror::Error;
use url::Url;

/// Base URL used when `WISHLIST_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API URL {0:?}: {1}")]
    InvalidApiUrl(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid log format: {s}")),
        }
    }
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL every request path is appended to
    pub api_url: Url,
    /// Log output format
    pub log_format: LogFormat,
}

impl ConsoleConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(
            &lookup("WISHLIST_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;
        let log_format = lookup("WISHLIST_LOG_FORMAT")
            .map(|raw| {
                raw.parse::<LogFormat>()
                    .map_err(|e| ConfigError::InvalidEnvVar("WISHLIST_LOG_FORMAT".to_string(), e))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            api_url,
            log_format,
        })
    }

    /// Replace the API URL, e.g. from a command-line override.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is not an absolute http(s) URL.
    pub fn with_api_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(raw)?;
        Ok(self)
    }
}

/// Parse and validate the service base URL.
///
/// # Errors
///
/// Returns error if the URL does not parse or is not http(s).
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl(raw.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl(
            raw.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidApiUrl(
            raw.to_string(),
            "base URL must not carry a query or fragment".to_string(),
        ));
    }

    Ok(url)
}
