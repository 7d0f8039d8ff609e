//! Centrality measures
//!
//! All maps are keyed by subject and contain every node of the graph.

use std::collections::{BTreeMap, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};
use rayon::prelude::*;

use crate::error::{EngineError, EngineResult};
use crate::types::Graph;

/// Default power-iteration cap
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default per-node convergence tolerance
pub const DEFAULT_TOLERANCE: f64 = 1.0e-6;

/// Node count above which Brandes passes run on the rayon pool
const PARALLEL_SOURCE_THRESHOLD: usize = 128;

fn keyed(graph: &Graph, values: Vec<f64>) -> BTreeMap<String, f64> {
    graph
        .nodes()
        .iter()
        .zip(values)
        .map(|(node, value)| (node.subject.clone(), value))
        .collect()
}

/// `deg(v) / (N - 1)`, or 0 everywhere when `N <= 1`
pub fn degree_centrality(graph: &Graph) -> BTreeMap<String, f64> {
    let n = graph.node_count();
    let values = graph
        .adjacency()
        .iter()
        .map(|nbrs| {
            if n <= 1 {
                0.0
            } else {
                nbrs.len() as f64 / (n - 1) as f64
            }
        })
        .collect();
    keyed(graph, values)
}

/// Single-source Brandes dependency accumulation on an unweighted graph
fn single_source_dependencies(pg: &UnGraph<String, ()>, source: usize) -> Vec<f64> {
    let n = pg.node_count();
    let mut stack = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::new();

    sigma[source] = 1.0;
    dist[source] = Some(0);
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let dv = dist[v].unwrap_or(0);
        for w in pg.neighbors(NodeIndex::new(v)).map(|w| w.index()) {
            if dist[w].is_none() {
                dist[w] = Some(dv + 1);
                queue.push_back(w);
            }
            if dist[w] == Some(dv + 1) {
                sigma[w] += sigma[v];
                preds[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    let mut dependencies = vec![0.0_f64; n];
    while let Some(w) = stack.pop() {
        for &v in &preds[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            dependencies[w] = delta[w];
        }
    }
    dependencies
}

/// Shortest-path betweenness, normalized by `(N - 1)(N - 2)`.
///
/// Unreachable pairs contribute nothing. Graphs with fewer than three
/// nodes have no intermediate positions and score 0 everywhere.
pub fn betweenness_centrality(graph: &Graph) -> BTreeMap<String, f64> {
    let n = graph.node_count();
    if n <= 2 {
        return keyed(graph, vec![0.0; n]);
    }

    let pg = graph.to_petgraph();
    let per_source: Vec<Vec<f64>> = if n > PARALLEL_SOURCE_THRESHOLD {
        (0..n)
            .into_par_iter()
            .map(|s| single_source_dependencies(&pg, s))
            .collect()
    } else {
        (0..n).map(|s| single_source_dependencies(&pg, s)).collect()
    };

    // summed in source order so results do not depend on scheduling
    let mut totals = vec![0.0_f64; n];
    for deps in &per_source {
        for (total, d) in totals.iter_mut().zip(deps) {
            *total += d;
        }
    }

    // each unordered pair was counted from both endpoints
    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    keyed(graph, totals.into_iter().map(|b| b * scale).collect())
}

/// Eigenvector centrality by power iteration on `A + I`.
///
/// Starts from the uniform vector, L2-normalizes each step and stops once
/// the summed absolute change drops below `N * tolerance`. Fails with
/// [`EngineError::EigenvectorNonConvergence`] when `max_iter` steps are not
/// enough, and with [`EngineError::EmptyGraph`] on a graph without nodes.
pub fn eigenvector_centrality(
    graph: &Graph,
    max_iter: usize,
    tolerance: f64,
) -> EngineResult<BTreeMap<String, f64>> {
    let n = graph.node_count();
    if n == 0 {
        return Err(EngineError::EmptyGraph);
    }

    let pg = graph.to_petgraph();
    let mut x = vec![1.0 / n as f64; n];

    for iteration in 1..=max_iter {
        let last = x.clone();
        for v in 0..n {
            for w in pg.neighbors(NodeIndex::new(v)) {
                x[w.index()] += last[v];
            }
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        for value in x.iter_mut() {
            *value /= norm;
        }

        let change: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        if change < n as f64 * tolerance {
            tracing::debug!(iteration, nodes = n, "eigenvector centrality converged");
            return Ok(keyed(graph, x));
        }
    }

    Err(EngineError::EigenvectorNonConvergence {
        iterations: max_iter,
    })
}
