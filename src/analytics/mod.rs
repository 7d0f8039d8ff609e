//! Graph analytics
//!
//! Centrality measures, community detection and key-player ranking over an
//! assembled graph. Nothing here mutates the graph or keeps state between
//! calls.

mod centrality;
mod community;

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::types::{AnalysisResult, Graph};

pub use centrality::{
    betweenness_centrality, degree_centrality, eigenvector_centrality, DEFAULT_MAX_ITER,
    DEFAULT_TOLERANCE,
};
pub use community::{greedy_modularity_communities, modularity};

/// Default number of key players
pub const DEFAULT_TOP_K: usize = 5;

/// Top `k` subjects by centrality, ties broken by subject ascending
pub fn key_players(centrality: &BTreeMap<String, f64>, k: usize) -> Vec<String> {
    let mut ranked: Vec<(&String, f64)> = centrality.iter().map(|(s, &v)| (s, v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(k).map(|(s, _)| s.clone()).collect()
}

/// Runs the full analytics suite with fixed parameters
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    top_k: usize,
    max_iter: usize,
    tolerance: f64,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            top_k: config.top_k,
            max_iter: config.eigenvector_max_iter,
            tolerance: config.eigenvector_tolerance,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Analyze `graph`, failing if eigenvector centrality is unavailable.
    ///
    /// An empty graph yields empty mappings rather than an error.
    pub fn analyze(&self, graph: &Graph) -> EngineResult<AnalysisResult> {
        let (result, eigen_error) = self.analyze_lenient(graph);
        match eigen_error {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }

    /// Analyze `graph`, keeping degree, betweenness, communities and key
    /// players when power iteration fails.
    ///
    /// The eigenvector mapping is `None` in that case and the failure is
    /// returned alongside.
    pub fn analyze_lenient(&self, graph: &Graph) -> (AnalysisResult, Option<EngineError>) {
        let degree = degree_centrality(graph);
        let betweenness = betweenness_centrality(graph);
        let communities = greedy_modularity_communities(graph);
        let players = key_players(&degree, self.top_k);

        let (eigenvector, eigen_error) = if graph.is_empty() {
            (Some(BTreeMap::new()), None)
        } else {
            match eigenvector_centrality(graph, self.max_iter, self.tolerance) {
                Ok(values) => (Some(values), None),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        nodes = graph.node_count(),
                        "eigenvector centrality unavailable"
                    );
                    (None, Some(err))
                }
            }
        };

        let result = AnalysisResult {
            degree_centrality: degree,
            betweenness_centrality: betweenness,
            eigenvector_centrality: eigenvector,
            communities,
            key_players: players,
        };
        (result, eigen_error)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze with default parameters
pub fn analyze(graph: &Graph) -> EngineResult<AnalysisResult> {
    Analyzer::new().analyze(graph)
}
