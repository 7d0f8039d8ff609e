//! Data types for the entity graph engine
//!
//! This module contains the core data structures shared by every stage of
//! the pipeline: records coming in from extraction, the assembled graph,
//! and the analytics result going out to renderers.

mod analysis;
mod graph;
mod record;
mod year;

pub use analysis::AnalysisResult;
pub use graph::{Graph, GraphEdge, GraphNode, RELATION_SEPARATOR};
pub use record::{EventTriple, NerEntity, Record, Span};
pub use year::NormalizedYear;

/// Result type for tool server operations
pub type McpResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
