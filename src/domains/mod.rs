//! Domains module containing the bridge's business logic.
//!
//! - **tools**: the MCP tool surface (`analyze_code_with_coai`)
//! - **analysis**: the remote CoAI analysis service client

pub mod analysis;
pub mod tools;
