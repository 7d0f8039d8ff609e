//! Build person-event graph tool

use serde_json::{json, Value};

use crate::assembler::build_person_event_graph;
use crate::protocol::{McpTool, Tool};
use crate::server::json_response;
use crate::types::{EventTriple, McpResult};

/// Tool for the bipartite person/event participation graph
pub struct BuildEventGraphTool;

impl BuildEventGraphTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildEventGraphTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for BuildEventGraphTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "build_event_graph".to_string(),
            description: "Build a person-event participation graph from (person, event, date) triples.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "triples": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "person": {"type": "string"},
                                "event": {"type": "string"},
                                "date": {"type": "string"}
                            },
                            "required": ["person", "event"]
                        }
                    }
                },
                "required": ["triples"]
            }),
        }
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let triples = params.get("triples").cloned().ok_or("Missing triples")?;
        let triples: Vec<EventTriple> = serde_json::from_value(triples)?;

        let graph = build_person_event_graph(&triples);
        tracing::info!(
            triples = triples.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "event graph built"
        );

        json_response(&graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_edges() {
        let response = BuildEventGraphTool::new()
            .execute(json!({
                "triples": [
                    {"person": "Alice", "event": "Summit", "date": "2021-06-01"},
                    {"person": "Bob", "event": "Summit"}
                ]
            }))
            .unwrap();

        let graph: Value =
            serde_json::from_str(response["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(graph["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(graph["edges"].as_array().unwrap().len(), 2);
        assert_eq!(graph["edges"][0]["relation"], "participated in");
    }

    #[test]
    fn test_malformed_triples() {
        let tool = BuildEventGraphTool::new();
        assert!(tool.execute(json!({})).is_err());
        assert!(tool.execute(json!({"triples": [{"person": "Alice"}]})).is_err());
    }
}
