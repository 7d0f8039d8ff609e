//! Analyze graph tool
//!
//! Builds the graph and runs the full analytics suite in one call. Power
//! iteration failing to converge does not fail the call: the other metrics
//! are returned and the eigenvector column is null.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::analytics::Analyzer;
use crate::assembler::build_graph;
use crate::config::EngineConfig;
use crate::export::{edge_table, label_distribution, node_table, EdgeRow, NodeRow};
use crate::protocol::{McpTool, Tool};
use crate::server::json_response;
use crate::types::McpResult;

use super::super::args::{bounded_records_arg, policy_arg, records_schema, truncation_warning};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisReport {
    nodes: Vec<NodeRow>,
    edges: Vec<EdgeRow>,
    communities: Vec<Vec<String>>,
    key_players: Vec<String>,
    label_distribution: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Tool for centrality, community and key-player analysis
pub struct AnalyzeGraphTool {
    config: Arc<EngineConfig>,
}

impl AnalyzeGraphTool {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Tool for AnalyzeGraphTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "analyze_graph".to_string(),
            description: "Build an entity graph from records and compute degree, betweenness and eigenvector centrality, greedy-modularity communities and the top key players.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "records": records_schema("Extracted records, or raw extraction output as text"),
                    "policy": {
                        "type": "string",
                        "enum": ["shared_type", "proximity"],
                        "description": "Relation policy. Defaults to the server configuration."
                    },
                    "proximity": {
                        "type": "integer",
                        "minimum": 0
                    },
                    "topK": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Number of key players to return"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Maximum number of records to analyze. Defaults to the server configuration."
                    },
                    "maxIter": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Power iteration cap for eigenvector centrality"
                    }
                },
                "required": ["records"]
            }),
        }
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let records = bounded_records_arg(&params, "records", &self.config)?;
        let policy = policy_arg(&params, &self.config)?;

        let mut analyzer = Analyzer::from_config(&self.config);
        if let Some(top_k) = params.get("topK").and_then(|v| v.as_u64()) {
            analyzer = analyzer.with_top_k(top_k as usize);
        }
        if let Some(max_iter) = params.get("maxIter").and_then(|v| v.as_u64()) {
            analyzer = analyzer.with_max_iter((max_iter as usize).max(1));
        }

        let graph = build_graph(&records.items, policy.as_ref());
        let (analysis, eigen_error) = analyzer.analyze_lenient(&graph);

        let mut warnings: Vec<String> = truncation_warning(&records).into_iter().collect();
        warnings.extend(eigen_error.map(|e| e.to_string()));

        let report = AnalysisReport {
            nodes: node_table(&graph, &analysis),
            edges: edge_table(&graph),
            communities: analysis.communities,
            key_players: analysis.key_players,
            label_distribution: label_distribution(&graph),
            warnings,
        };

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            communities = report.communities.len(),
            "graph analyzed"
        );

        json_response(&report)
    }
}
