//! Configuration management for the bridge.
//!
//! This module provides a centralized configuration structure that is
//! populated once at startup from environment variables (and an optional
//! `.env` file), falling back to defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Production endpoint of the CoAI analysis service.
pub const DEFAULT_SERVER_URL: &str = "https://api.co-ai.run/api/mcp/analyze";

/// Placeholder token used when `COAI_MCP_TOKEN` is not set.
pub const DEFAULT_MCP_TOKEN: &str = "codenose-mcp-secret-key";

/// User identifier sent with every analysis when `COAI_USER_ID` is not set.
pub const DEFAULT_USER_ID: &str = "1";

/// Hostnames for which certificate validation is skipped.
const LOOPBACK_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Main configuration structure for the bridge.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Remote analysis service configuration.
    pub coai: CoaiConfig,
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
}

/// Connection settings for the remote CoAI analysis service.
#[derive(Clone, Serialize, Deserialize)]
pub struct CoaiConfig {
    /// Full URL of the analyze endpoint.
    pub server_url: String,

    /// Shared secret sent as `X-MCP-Token`.
    pub mcp_token: String,

    /// User the analyses are attributed to.
    pub user_id: String,

    /// Skip TLS certificate validation. Only set for loopback endpoints.
    pub accept_invalid_certs: bool,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CoaiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoaiConfig")
            .field("server_url", &self.server_url)
            .field("mcp_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl CoaiConfig {
    /// Build the service settings, deciding the certificate policy from the URL.
    pub fn new(
        server_url: impl Into<String>,
        mcp_token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let server_url = server_url.into();
        let accept_invalid_certs = is_loopback_url(&server_url);

        Self {
            server_url,
            mcp_token: mcp_token.into(),
            user_id: user_id.into(),
            accept_invalid_certs,
        }
    }
}

impl Default for CoaiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL, DEFAULT_MCP_TOKEN, DEFAULT_USER_ID)
    }
}

/// Whether the URL's host is literally one of the loopback names.
///
/// Unparseable URLs are treated as remote so validation stays on.
pub fn is_loopback_url(url: &str) -> bool {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|host| LOOPBACK_HOSTS.contains(&host)))
        .unwrap_or(false)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "codenose-analysis-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            coai: CoaiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Service settings use the `COAI_` prefix (`COAI_SERVER_URL`,
    /// `COAI_MCP_TOKEN`, `COAI_USER_ID`); server settings use `MCP_`
    /// (`MCP_SERVER_NAME`, `MCP_LOG_LEVEL`). A `.env` file is read first but
    /// never overrides variables already set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, defaulting missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        let server_url =
            lookup("COAI_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let mcp_token = match lookup("COAI_MCP_TOKEN") {
            Some(token) => {
                info!("MCP token loaded from environment");
                token
            }
            None => {
                warn!("COAI_MCP_TOKEN not set - using the placeholder token");
                DEFAULT_MCP_TOKEN.to_string()
            }
        };

        let user_id = lookup("COAI_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        config.coai = CoaiConfig::new(server_url, mcp_token, user_id);

        config
    }
}
