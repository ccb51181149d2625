//! Tool definitions module.
//!
//! Each tool is defined in its own file.

pub mod analyze_code;

pub use analyze_code::{AnalyzeCodeArgs, AnalyzeCodeParams, AnalyzeCodeTool, DEFAULT_LANGUAGE};
