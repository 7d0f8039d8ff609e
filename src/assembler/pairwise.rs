//! Pairwise graph assembly from flat record lists

use rayon::prelude::*;

use crate::inference::RelationPolicy;
use crate::temporal::normalize_year;
use crate::types::{Graph, GraphNode, Record};

/// Record count above which pair evaluation runs on the rayon pool
const PARALLEL_PAIR_THRESHOLD: usize = 64;

/// Build a graph from `records`, relating every unordered pair with `policy`.
///
/// Nodes are keyed by subject; a later record with the same subject
/// overwrites the node's attributes. Pair evaluation is O(n²), so callers
/// are expected to bound `n` with [`crate::temporal::limit`].
pub fn build_graph(records: &[Record], policy: &dyn RelationPolicy) -> Graph {
    let records: Vec<&Record> = records
        .iter()
        .filter(|r| {
            let valid = r.is_valid();
            if !valid {
                tracing::warn!(label = %r.label, "skipping record with empty subject");
            }
            valid
        })
        .collect();

    let mut graph = Graph::new();
    for record in &records {
        graph.upsert_node(GraphNode {
            subject: record.subject.clone(),
            label: record.label.clone(),
            year: normalize_year(record.date_text.as_deref()),
            span: record.span,
        });
    }

    for (i, j, relation) in related_pairs(&records, policy) {
        let (a, b) = (records[i], records[j]);
        let date = a
            .date_text
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| b.date_text.as_deref().filter(|d| !d.is_empty()));
        // same-subject pairs are rejected here as self-loops
        graph.upsert_edge(&a.subject, &b.subject, &relation, date);
    }

    tracing::debug!(
        policy = policy.name(),
        records = records.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "assembled graph"
    );
    graph
}

/// All related `(i, j, relation)` with `i < j`, in lexicographic pair order
fn related_pairs(records: &[&Record], policy: &dyn RelationPolicy) -> Vec<(usize, usize, String)> {
    let n = records.len();
    let row = |i: usize| {
        ((i + 1)..n)
            .filter_map(|j| policy.relate(records[i], records[j]).map(|rel| (i, j, rel)))
            .collect::<Vec<_>>()
    };

    if n > PARALLEL_PAIR_THRESHOLD {
        // collect keeps row order, so the fold below stays deterministic
        (0..n).into_par_iter().flat_map_iter(row).collect()
    } else {
        (0..n).flat_map(row).collect()
    }
}
