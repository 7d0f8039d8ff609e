//! Engine tools exposed by the tool server
//!
//! - Graph tools (3): assembly and analytics
//! - Temporal tools (2): year filtering and date range
//! - Scoring tools (1): extraction accuracy

mod args;
pub mod graph;
pub mod scoring;
pub mod temporal;

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::server::McpServer;

pub use graph::{AnalyzeGraphTool, BuildEventGraphTool, BuildGraphTool};
pub use scoring::ScoreAccuracyTool;
pub use temporal::{DateRangeTool, FilterRecordsTool};

/// Register all tools with the server
pub fn register_all_tools(server: &mut McpServer, config: Arc<EngineConfig>) {
    server.register_tool(Box::new(BuildGraphTool::new(config.clone())));
    server.register_tool(Box::new(BuildEventGraphTool::new()));
    server.register_tool(Box::new(AnalyzeGraphTool::new(config.clone())));

    server.register_tool(Box::new(FilterRecordsTool::new(config)));
    server.register_tool(Box::new(DateRangeTool::new()));

    server.register_tool(Box::new(ScoreAccuracyTool::new()));
}
