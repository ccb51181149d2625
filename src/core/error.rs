//! Error types and handling for the bridge.
//!
//! A unified error type for everything that can abort startup or the
//! session. Per-call failures never reach this type: remote errors become
//! `isError` tool results and an unknown tool name becomes a JSON-RPC error.

use thiserror::Error;

/// A specialized Result type for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the bridge.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the analysis client.
    #[error("Analysis client error: {0}")]
    Analysis(#[from] crate::domains::analysis::AnalysisError),

    /// The stdio session could not be established or ended abnormally.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
