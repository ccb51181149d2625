//! Tool Router - builds the rmcp ToolRouter.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;
use crate::domains::analysis::AnalysisBackend;

use super::definitions::AnalyzeCodeTool;

/// Build the tool router with all registered tools.
///
/// Calls naming any other tool are rejected by the router itself with a
/// JSON-RPC error.
pub fn build_tool_router<S>(config: Arc<Config>, backend: Arc<dyn AnalysisBackend>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new().with_route(AnalyzeCodeTool::create_route(config, backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::analysis::testing::{RecordingBackend, Reply};

    struct TestServer {}

    fn test_router() -> ToolRouter<TestServer> {
        let backend = RecordingBackend::new(Reply::Result(serde_json::Value::Null));
        build_tool_router(Arc::new(Config::default()), backend)
    }

    #[test]
    fn test_build_router() {
        let router = test_router();
        let tools = router.list_all();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "analyze_code_with_coai");
        assert!(router.has_route("analyze_code_with_coai"));
        assert!(!router.has_route("format_code"));
    }
}
