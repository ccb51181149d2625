//! Errors raised while calling the remote analysis service.
//!
//! The `Display` text of every variant is what ends up after
//! `Analysis Failed: ` in the tool output, so it stays human readable.

use serde_json::Value;
use thiserror::Error;

use super::client::is_falsy;

/// Operational failures of a single analysis call.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request never produced a response (connect, TLS, timeout...).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A success response whose body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    /// Build a rejection from a non-success response body.
    ///
    /// Uses the server's `error` field when the body carries a truthy one,
    /// otherwise the generic status message.
    pub fn rejected(status: u16, body: &[u8]) -> Self {
        let server_message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|mut v| v.get_mut("error").map(Value::take))
            .filter(|error| !is_falsy(error))
            .map(|error| match error {
                Value::String(s) => s,
                other => other.to_string(),
            });

        Self::Rejected {
            status,
            message: server_message
                .unwrap_or_else(|| format!("Request failed with status code {}", status)),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest keeps the useful part (e.g. "Connection refused") in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        Self::Transport(message)
    }
}
