//! Tools domain module.
//!
//! Tools are the functions MCP clients can call. This bridge exposes exactly
//! one, `analyze_code_with_coai`.
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Builds the rmcp ToolRouter

pub mod definitions;
pub mod router;

pub use router::build_tool_router;
