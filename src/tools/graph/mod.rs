//! Graph assembly and analytics tools

mod analyze_graph;
mod build_event_graph;
mod build_graph;

pub use analyze_graph::AnalyzeGraphTool;
pub use build_event_graph::BuildEventGraphTool;
pub use build_graph::BuildGraphTool;
