//! Client for the CoAI `/api/mcp/analyze` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::AnalysisError;
use crate::core::config::CoaiConfig;

/// Header carrying the shared secret.
pub const TOKEN_HEADER: &str = "X-MCP-Token";

/// Body of the outbound analysis call.
///
/// `code` and `language` are whatever the caller sent; the service does the
/// validation. An absent `code` is left out of the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    pub language: Value,
    pub user_id: String,
}

impl AnalysisRequest {
    /// Length of the code in bytes, zero when it is absent or not a string.
    pub fn code_len(&self) -> usize {
        self.code.as_ref().and_then(Value::as_str).map_or(0, str::len)
    }
}

/// JSON values that count as "not provided": null, false, zero and "".
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Success body returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    /// Missing `result` reads as `null`.
    #[serde(default)]
    pub result: Value,
}

impl AnalysisResponse {
    /// Render the result as tool output text.
    ///
    /// Strings pass through verbatim; anything else is pretty-printed JSON.
    pub fn into_text(self) -> String {
        match self.result {
            Value::String(text) => text,
            other => serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

/// Something that can run a code analysis.
///
/// The tool only depends on this trait; production uses
/// [`HttpAnalysisClient`].
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Run one analysis. Exactly one remote attempt, no retries.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError>;
}

/// reqwest-backed client for the remote analysis service.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl std::fmt::Debug for HttpAnalysisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAnalysisClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpAnalysisClient {
    /// Build the client. The certificate policy is fixed here for the
    /// lifetime of the process.
    pub fn new(config: &CoaiConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AnalysisError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.server_url.clone(),
            token: config.mcp_token.clone(),
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        debug!(
            "POST {} (language: {}, {} bytes of code)",
            self.endpoint,
            request.language,
            request.code_len()
        );

        // `json()` also sets `Content-Type: application/json`
        let response = self
            .http
            .post(&self.endpoint)
            .header(TOKEN_HEADER, &self.token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!("Analysis service answered {}", status);
            return Err(AnalysisError::rejected(status.as_u16(), &body));
        }

        debug!("Analysis response received: {} bytes", body.len());

        serde_json::from_slice(&body).map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
    }
}
