//! MCP server handler.
//!
//! Answers `initialize`, `tools/list` and `tools/call`. Tool dispatch is done
//! by the rmcp `ToolRouter` built in `domains/tools/router.rs`; a call naming
//! an unregistered tool is rejected there with a JSON-RPC error.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::analysis::{AnalysisBackend, HttpAnalysisClient};
use crate::domains::tools::build_tool_router;

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server that talks to the configured CoAI endpoint.
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let client = HttpAnalysisClient::new(&config.coai)?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    /// Create a server on top of an arbitrary analysis backend.
    pub fn with_backend(config: Config, backend: Arc<dyn AnalysisBackend>) -> Self {
        let config = Arc::new(config);

        Self {
            tool_router: build_tool_router::<Self>(config.clone(), backend),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Use analyze_code_with_coai to have the CoAI (CodeNose) engine review source code."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
