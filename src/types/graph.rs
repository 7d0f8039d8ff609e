//! Entity-relation graph container

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use super::{NormalizedYear, Span};

/// Separator used when several record pairs justify the same edge
pub const RELATION_SEPARATOR: &str = "; ";

/// Graph vertex keyed by its subject string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub subject: String,
    pub label: String,
    pub year: NormalizedYear,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// Undirected edge between two distinct nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl GraphEdge {
    /// Whether this edge touches `subject`
    pub fn touches(&self, subject: &str) -> bool {
        self.source == subject || self.target == subject
    }

    /// The individual justifications merged into this edge
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.relation.split(RELATION_SEPARATOR)
    }
}

/// Deduplicated, attributed, undirected graph
///
/// Nodes and edges keep insertion order. Lookups go through private
/// indexes that are rebuilt on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphData")]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    #[serde(skip)]
    edge_index: HashMap<(usize, usize), usize>,
}

#[derive(Deserialize)]
struct GraphData {
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

impl From<GraphData> for Graph {
    fn from(data: GraphData) -> Self {
        let mut graph = Graph::new();
        for node in data.nodes {
            graph.upsert_node(node);
        }
        for edge in data.edges {
            graph.upsert_edge(&edge.source, &edge.target, &edge.relation, edge.date.as_deref());
        }
        graph
    }
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, subject: &str) -> Option<&GraphNode> {
        self.node_index.get(subject).map(|&i| &self.nodes[i])
    }

    pub fn index_of(&self, subject: &str) -> Option<usize> {
        self.node_index.get(subject).copied()
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.node_index.contains_key(subject)
    }

    /// Edge between two subjects, in either direction
    pub fn edge(&self, a: &str, b: &str) -> Option<&GraphEdge> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        self.edge_index.get(&pair_key(ia, ib)).map(|&i| &self.edges[i])
    }

    /// Insert a node, or overwrite the attributes of the existing node with
    /// the same subject. Returns the node's position.
    pub fn upsert_node(&mut self, node: GraphNode) -> usize {
        match self.node_index.get(&node.subject) {
            Some(&i) => {
                let existing = &mut self.nodes[i];
                existing.label = node.label;
                existing.year = node.year;
                existing.span = node.span;
                i
            }
            None => {
                let i = self.nodes.len();
                self.node_index.insert(node.subject.clone(), i);
                self.nodes.push(node);
                i
            }
        }
    }

    /// Insert an edge between two existing nodes, appending `relation` to the
    /// existing text when the pair is already connected.
    ///
    /// Returns `false` (and changes nothing) for self-loops or unknown nodes.
    pub fn upsert_edge(&mut self, a: &str, b: &str, relation: &str, date: Option<&str>) -> bool {
        let (Some(ia), Some(ib)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        if ia == ib {
            return false;
        }

        match self.edge_index.get(&pair_key(ia, ib)) {
            Some(&e) => {
                let edge = &mut self.edges[e];
                if !edge.relation.is_empty() {
                    edge.relation.push_str(RELATION_SEPARATOR);
                }
                edge.relation.push_str(relation);
                if edge.date.is_none() {
                    edge.date = date.map(str::to_string);
                }
            }
            None => {
                self.edge_index.insert(pair_key(ia, ib), self.edges.len());
                self.edges.push(GraphEdge {
                    source: a.to_string(),
                    target: b.to_string(),
                    relation: relation.to_string(),
                    date: date.map(str::to_string),
                });
            }
        }
        true
    }

    /// Sorted neighbor positions per node
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.nodes.len()];
        for &(a, b) in self.edge_index.keys() {
            adj[a].push(b);
            adj[b].push(a);
        }
        for list in &mut adj {
            list.sort_unstable();
        }
        adj
    }

    /// Number of edges incident to `subject`
    pub fn degree(&self, subject: &str) -> usize {
        self.edges.iter().filter(|e| e.touches(subject)).count()
    }

    /// Petgraph view whose node indices match this graph's positions
    pub fn to_petgraph(&self) -> UnGraph<String, ()> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        for node in &self.nodes {
            graph.add_node(node.subject.clone());
        }
        let mut pairs: Vec<(usize, usize)> = self.edge_index.keys().copied().collect();
        pairs.sort_unstable();
        for (a, b) in pairs {
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        graph
    }
}
