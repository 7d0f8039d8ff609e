//! Person–event graph built directly from extraction triples

use crate::temporal::normalize_year;
use crate::types::{EventTriple, Graph, GraphNode};

pub const PERSON_LABEL: &str = "person";
pub const EVENT_LABEL: &str = "event";
pub const PARTICIPATION_RELATION: &str = "participated in";

/// Connect each triple's person to its event, carrying the triple's date.
pub fn build_person_event_graph(triples: &[EventTriple]) -> Graph {
    let mut graph = Graph::new();

    for triple in triples {
        if triple.person.is_empty() || triple.event.is_empty() {
            tracing::warn!(?triple, "skipping triple with an empty endpoint");
            continue;
        }
        let year = normalize_year(Some(&triple.date));
        graph.upsert_node(GraphNode {
            subject: triple.person.clone(),
            label: PERSON_LABEL.to_string(),
            year,
            span: None,
        });
        graph.upsert_node(GraphNode {
            subject: triple.event.clone(),
            label: EVENT_LABEL.to_string(),
            year,
            span: None,
        });

        let date = (!triple.date.is_empty()).then_some(triple.date.as_str());
        graph.upsert_edge(&triple.person, &triple.event, PARTICIPATION_RELATION, date);
    }

    tracing::debug!(
        triples = triples.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "assembled person-event graph"
    );
    graph
}
