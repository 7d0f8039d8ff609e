//! Flat tables for renderers
//!
//! Chart and network renderers want rows, not graphs. These helpers join a
//! graph with its analysis into serializable rows and nothing else; layout
//! and styling belong to the renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AnalysisResult, Graph, NormalizedYear};

pub use crate::temporal::{timeline, TimelineEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    pub id: String,
    pub label: String,
    pub year: NormalizedYear,
    pub degree: f64,
    pub betweenness: f64,
    /// `None` when power iteration did not converge
    pub eigenvector: Option<f64>,
    /// Index into `AnalysisResult::communities`
    pub community: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    pub relation: String,
    pub date: Option<String>,
}

/// One row per node, in node insertion order
pub fn node_table(graph: &Graph, analysis: &AnalysisResult) -> Vec<NodeRow> {
    let community_index: BTreeMap<&str, usize> = analysis
        .communities
        .iter()
        .enumerate()
        .flat_map(|(i, members)| members.iter().map(move |m| (m.as_str(), i)))
        .collect();

    graph
        .nodes()
        .iter()
        .map(|node| NodeRow {
            id: node.subject.clone(),
            label: node.label.clone(),
            year: node.year,
            degree: analysis
                .degree_centrality
                .get(&node.subject)
                .copied()
                .unwrap_or(0.0),
            betweenness: analysis
                .betweenness_centrality
                .get(&node.subject)
                .copied()
                .unwrap_or(0.0),
            eigenvector: analysis.eigenvector(&node.subject),
            community: community_index.get(node.subject.as_str()).copied(),
        })
        .collect()
}

pub fn edge_table(graph: &Graph) -> Vec<EdgeRow> {
    graph
        .edges()
        .iter()
        .map(|edge| EdgeRow {
            source: edge.source.clone(),
            target: edge.target.clone(),
            relation: edge.relation.clone(),
            date: edge.date.clone(),
        })
        .collect()
}

/// Node count per label
pub fn label_distribution(graph: &Graph) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for node in graph.nodes() {
        *counts.entry(node.label.clone()).or_insert(0) += 1;
    }
    counts
}
