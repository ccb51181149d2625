//! Session serving.
//!
//! The bridge runs one MCP session on stdin/stdout and exits when the client
//! hangs up. `serve_session` is transport-agnostic so the same code path can
//! be driven over an in-memory pipe.

use rmcp::{RoleServer, ServiceExt, service::QuitReason, transport::IntoTransport};
use thiserror::Error;
use tracing::info;

use super::McpServer;

/// Failures that end a session early.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The client went away or misbehaved before `initialize` completed.
    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    /// The session task terminated abnormally.
    #[error("Session aborted: {0}")]
    Session(String),
}

/// Serve one session on stdin/stdout until the client disconnects.
pub async fn serve_stdio(server: McpServer) -> Result<QuitReason, TransportError> {
    info!("Ready - communicating via stdin/stdout");
    let reason = serve_session(server, rmcp::transport::stdio()).await?;
    info!("STDIO session closed: {:?}", reason);
    Ok(reason)
}

/// Run the MCP handshake on `transport`, then serve requests until it closes.
pub async fn serve_session<T, E, A>(
    server: McpServer,
    transport: T,
) -> Result<QuitReason, TransportError>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let service = server
        .serve(transport)
        .await
        .map_err(|e| TransportError::Handshake(e.to_string()))?;

    service
        .waiting()
        .await
        .map_err(|e| TransportError::Session(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::analysis::testing::{RecordingBackend, Reply};

    #[tokio::test]
    async fn test_client_hangup_before_initialize_is_handshake_error() {
        let backend = RecordingBackend::new(Reply::Result(serde_json::Value::Null));
        let server = McpServer::with_backend(Config::default(), backend);

        let (client_io, server_io) = tokio::io::duplex(1024);
        drop(client_io);

        let err = serve_session(server, server_io).await.unwrap_err();
        assert!(matches!(err, TransportError::Handshake(_)));
        assert!(err.to_string().starts_with("MCP handshake failed"));
    }
}
