//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default Klaviyo API base URL.
pub const DEFAULT_BASE_URL: &str = "https://a.klaviyo.com/api";

/// API revision pinned in the `revision` header.
pub const DEFAULT_REVISION: &str = "2023-12-15";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Klaviyo API access.
    pub klaviyo: KlaviyoConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the Klaviyo API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct KlaviyoConfig {
    /// Private API key. Checked on first request, not at startup.
    pub api_key: Option<String>,

    /// Base URL every request path is appended to.
    pub base_url: String,

    /// Value of the `revision` header.
    pub revision: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for KlaviyoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KlaviyoConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("revision", &self.revision)
            .finish()
    }
}

impl Default for KlaviyoConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            revision: DEFAULT_REVISION.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "klaviyo-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            klaviyo: KlaviyoConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). Klaviyo settings use
    /// `KLAVIYO_API_KEY`, `KLAVIYO_API_BASE_URL` and `KLAVIYO_API_REVISION`.
    ///
    /// A missing API key is only logged; it is reported to clients on the
    /// first tool call. An unusable base URL is rejected here.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env()?;

        match std::env::var("KLAVIYO_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                config.klaviyo.api_key = Some(key);
                info!("Klaviyo API key loaded from environment");
            }
            _ => {
                warn!(
                    "KLAVIYO_API_KEY not set - tool calls will fail until it is provided"
                );
            }
        }

        if let Ok(base_url) = std::env::var("KLAVIYO_API_BASE_URL") {
            validate_base_url(&base_url)?;
            info!("Using Klaviyo API base URL: {}", base_url);
            config.klaviyo.base_url = base_url;
        }

        if let Ok(revision) = std::env::var("KLAVIYO_API_REVISION") {
            info!("Using Klaviyo API revision: {}", revision);
            config.klaviyo.revision = revision;
        }

        Ok(config)
    }
}

/// Check that a base URL is an absolute http(s) URL.
fn validate_base_url(base_url: &str) -> Result<()> {
    let url = reqwest::Url::parse(base_url)
        .map_err(|e| Error::config(format!("KLAVIYO_API_BASE_URL '{}': {}", base_url, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::config(format!(
            "KLAVIYO_API_BASE_URL must use http or https, got '{}'",
            other
        ))),
    }
}

// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe {
            std::env::set_var("KLAVIYO_API_KEY", "pk_test_12345");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.klaviyo.api_key.as_deref(), Some("pk_test_12345"));
        unsafe {
            std::env::remove_var("KLAVIYO_API_KEY");
        }
    }

    #[test]
    fn test_missing_api_key_is_not_fatal() {
        let _lock = ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe {
            std::env::set_var("KLAVIYO_API_KEY", "");
        }
        let config = Config::from_env().unwrap();
        assert!(config.klaviyo.api_key.is_none());
        unsafe {
            std::env::remove_var("KLAVIYO_API_KEY");
        }
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let _lock = ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe {
            std::env::set_var("KLAVIYO_API_BASE_URL", "ftp://example.com/api");
        }
        let result = Config::from_env();
        unsafe {
            std::env::remove_var("KLAVIYO_API_BASE_URL");
        }
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_revision_override() {
        let _lock = ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe {
            std::env::set_var("KLAVIYO_API_REVISION", "2024-10-15");
        }
        let config = Config::from_env().unwrap();
        unsafe {
            std::env::remove_var("KLAVIYO_API_REVISION");
        }
        assert_eq!(config.klaviyo.revision, "2024-10-15");
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let klaviyo = KlaviyoConfig {
            api_key: Some("pk_super_secret".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", klaviyo);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("pk_super_secret"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.klaviyo.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.klaviyo.revision, "2023-12-15");
        assert!(config.klaviyo.api_key.is_none());
    }
}
