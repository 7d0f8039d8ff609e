//! Entity Graph Engine
//!
//! Turns extracted entity records into a deduplicated, attributed graph and
//! analyzes it. Extraction itself happens elsewhere; this crate starts from
//! its output.
//!
//! # Pipeline
//!
//! 1. **Normalize** free-form dates to a year ([`temporal::normalize_year`])
//! 2. **Relate** record pairs under a pluggable policy ([`inference`])
//! 3. **Assemble** the graph ([`assembler::build_graph`])
//! 4. **Filter** by year range with truncation warnings ([`temporal`])
//! 5. **Analyze** centrality, communities and key players ([`analytics`])
//! 6. **Score** extraction against a reference set ([`scoring`])
//!
//! # Modules
//!
//! - `types`: Core data structures (Record, Graph, AnalysisResult)
//! - `io`: Parsing extraction output and JSON persistence
//! - `export`: Node and edge tables for renderers
//! - `config`: Engine parameters with environment overrides
//! - `protocol`, `server`, `tools`: JSON-RPC tool server over stdio
//!
//! # Example
//!
//! ```
//! use entity_graph::analytics::analyze;
//! use entity_graph::assembler::build_graph;
//! use entity_graph::inference::SharedTypePolicy;
//! use entity_graph::types::Record;
//!
//! let records = vec![
//!     Record::new("Alice", "PERSON").with_date("1990"),
//!     Record::new("Bob", "PERSON"),
//!     Record::new("Paris", "LOC"),
//! ];
//! let graph = build_graph(&records, &SharedTypePolicy);
//! assert_eq!(graph.edge_count(), 1);
//!
//! let result = analyze(&graph).unwrap();
//! assert_eq!(result.communities.len(), 2);
//! ```

pub mod analytics;
pub mod assembler;
pub mod config;
pub mod error;
pub mod export;
pub mod inference;
pub mod io;
pub mod protocol;
pub mod scoring;
pub mod server;
pub mod temporal;
pub mod tools;
pub mod types;

// Re-export commonly used items at crate root
pub use analytics::{analyze, Analyzer};
pub use assembler::{build_graph, build_person_event_graph};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use inference::{PolicyKind, ProximityTypePolicy, RelationPolicy, SharedTypePolicy};
pub use protocol::{McpTool, ServerInfo, Tool};
pub use scoring::score;
pub use server::McpServer;
pub use temporal::{filter_by_year_range, get_date_range, limit, normalize_year};
pub use types::{
    AnalysisResult, EventTriple, Graph, GraphEdge, GraphNode, McpResult, NerEntity,
    NormalizedYear, Record, Span,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
