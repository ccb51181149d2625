//! CoAI MCP Bridge
//!
//! An MCP server exposing the remote CoAI (CodeNose) code analysis service as
//! a single tool, `analyze_code_with_coai`.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and the stdio session
//! - **domains**: business logic
//!   - **tools**: the MCP tool surface
//!   - **analysis**: the HTTP client for the remote analysis service
//!
//! # Example
//!
//! ```rust,no_run
//! use coai_mcp_bridge::core::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     coai_mcp_bridge::run(config).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use crate::core::{Config, Error, McpServer, Result};

use tracing::{info, warn};

/// Build the server from `config` and serve it over stdio until the client disconnects.
pub async fn run(config: Config) -> Result<()> {
    if config.coai.accept_invalid_certs {
        warn!(
            "Loopback endpoint {} - TLS certificate validation disabled",
            config.coai.server_url
        );
    }

    let server = McpServer::new(config.clone())?;
    info!(
        "Server initialized (endpoint: {}, user: {})",
        config.coai.server_url, config.coai.user_id
    );

    crate::core::serve_stdio(server).await?;
    Ok(())
}
