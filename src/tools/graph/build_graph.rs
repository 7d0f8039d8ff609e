//! Build graph tool

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::assembler::build_graph;
use crate::config::EngineConfig;
use crate::protocol::{McpTool, Tool};
use crate::server::json_response;
use crate::types::{Graph, McpResult};

use super::super::args::{bounded_records_arg, policy_arg, records_schema, truncation_warning};

#[derive(Serialize)]
struct GraphReport<'a> {
    #[serde(flatten)]
    graph: &'a Graph,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Tool for assembling an entity graph from extracted records
pub struct BuildGraphTool {
    config: Arc<EngineConfig>,
}

impl BuildGraphTool {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Tool for BuildGraphTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "build_graph".to_string(),
            description: "Assemble an undirected entity graph from extracted records. Each distinct subject becomes a node; pairs related under the chosen policy become edges.".to_string(),
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
                        "minimum": 0,
                        "description": "Maximum start-offset distance for the proximity policy"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Maximum number of records to assemble. Defaults to the server configuration."
                    }
                },
                "required": ["records"]
            }),
        }
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let records = bounded_records_arg(&params, "records", &self.config)?;
        let policy = policy_arg(&params, &self.config)?;

        let graph = build_graph(&records.items, policy.as_ref());
        tracing::info!(
            policy = policy.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph built"
        );

        json_response(&GraphReport {
            graph: &graph,
            warnings: truncation_warning(&records).into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> BuildGraphTool {
        BuildGraphTool::new(Arc::new(EngineConfig::default()))
    }

    fn payload(response: &Value) -> Value {
        serde_json::from_str(response["content"][0]["text"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_tool_definition() {
        let def = tool().definition();
        assert_eq!(def.name, "build_graph");
        let required = def.input_schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "records"));
    }

    #[test]
    fn test_shared_type_default() {
        let response = tool()
            .execute(json!({
                "records": [
                    {"subject": "Alice", "label": "PERSON"},
                    {"subject": "Bob", "label": "PERSON"},
                    {"subject": "Paris", "label": "LOC"}
                ]
            }))
            .unwrap();

        let graph = payload(&response);
        assert_eq!(graph["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(graph["edges"].as_array().unwrap().len(), 1);
        assert_eq!(graph["edges"][0]["relation"], "Shared type: PERSON");
    }

    #[test]
    fn test_proximity_override() {
        let records = json!([
            {"subject": "A", "label": "ORG", "span": {"start": 10, "end": 11}},
            {"subject": "B", "label": "ORG", "span": {"start": 50, "end": 51}}
        ]);

        let near = payload(&tool().execute(json!({"records": records, "policy": "proximity"})).unwrap());
        assert_eq!(near["edges"].as_array().unwrap().len(), 1);

        let far = payload(
            &tool()
                .execute(json!({"records": records, "policy": "proximity", "proximity": 40}))
                .unwrap(),
        );
        assert!(far["edges"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_input_is_capped_at_max_records() {
        let records: Vec<Value> = (0..60)
            .map(|i| json!({"subject": format!("E{:02}", i), "label": "X"}))
            .collect();

        let graph = payload(&tool().execute(json!({"records": records})).unwrap());
        assert_eq!(graph["nodes"].as_array().unwrap().len(), 50);
        assert!(graph["warnings"][0]
            .as_str()
            .unwrap()
            .contains("first 50 of 60 records"));

        let graph = payload(&tool().execute(json!({"records": records, "limit": 60})).unwrap());
        assert_eq!(graph["nodes"].as_array().unwrap().len(), 60);
        assert!(graph.get("warnings").is_none());
    }

    #[test]
    fn test_missing_records() {
        assert!(tool().execute(json!({})).is_err());
        assert!(tool()
            .execute(json!({"records": [], "policy": "astrology"}))
            .is_err());
    }
}
