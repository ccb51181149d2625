//! CoAI code analysis tool definition.
//!
//! Forwards a piece of source code to the remote CoAI (CodeNose) engine and
//! returns its report. Arguments are not validated here: whatever the caller
//! sends goes to the service, and remote failures come back as an `isError`
//! result, never as a protocol error.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::config::{CoaiConfig, Config};
use crate::domains::analysis::{AnalysisBackend, AnalysisRequest, is_falsy};

/// Language assumed when the caller does not name one.
pub const DEFAULT_LANGUAGE: &str = "java";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Input schema advertised for the analyze code tool.
#[derive(Debug, Clone, JsonSchema)]
pub struct AnalyzeCodeParams {
    /// The source code content to analyze
    pub code: String,

    /// The programming language of the code (e.g., java, python, js)
    #[serde(default)]
    #[schemars(with = "String", extend("default" = "java"))]
    pub language: Option<String>,
}

/// Arguments of one call, taken as sent.
///
/// The advertised schema is a hint for clients; a call with a missing or
/// mistyped field is still forwarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeCodeArgs {
    pub code: Option<Value>,
    pub language: Option<Value>,
}

impl AnalyzeCodeArgs {
    /// Pick the known fields out of the call arguments, ignoring the rest.
    pub fn from_arguments(mut arguments: JsonObject) -> Self {
        Self {
            code: arguments.remove("code"),
            language: arguments.remove("language"),
        }
    }

    /// The language to send, falling back to [`DEFAULT_LANGUAGE`] when absent or falsy.
    pub fn language_or_default(&self) -> Value {
        self.language
            .clone()
            .filter(|language| !is_falsy(language))
            .unwrap_or_else(|| Value::from(DEFAULT_LANGUAGE))
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Analyze code tool - delegates to the CoAI analysis service.
pub struct AnalyzeCodeTool;

impl AnalyzeCodeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "analyze_code_with_coai";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Analyze code using the Coai (CodeNose) AI engine to find bugs, mistakes, and improvements.";

    /// Run one analysis and translate the outcome into a tool result.
    ///
    /// The user id always comes from configuration, never from the caller.
    #[instrument(skip_all, fields(language = %args.language_or_default()))]
    pub async fn execute(
        args: &AnalyzeCodeArgs,
        config: &CoaiConfig,
        backend: &dyn AnalysisBackend,
    ) -> CallToolResult {
        let request = AnalysisRequest {
            code: args.code.clone(),
            language: args.language_or_default(),
            user_id: config.user_id.clone(),
        };

        info!(
            "Analyze code tool called ({} bytes, user {})",
            request.code_len(),
            request.user_id
        );

        match backend.analyze(&request).await {
            Ok(response) => {
                info!("Analysis completed");
                CallToolResult::success(vec![Content::text(response.into_text())])
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                CallToolResult::error(vec![Content::text(format!("Analysis Failed: {}", e))])
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AnalyzeCodeParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(config: Arc<Config>, backend: Arc<dyn AnalysisBackend>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = AnalyzeCodeArgs::from_arguments(ctx.arguments.clone().unwrap_or_default());
            let config = config.clone();
            let backend = backend.clone();
            async move {
                Ok::<_, McpError>(Self::execute(&args, &config.coai, backend.as_ref()).await)
            }
            .boxed()
        })
    }
}
