//! Graph analytics output

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Centrality mappings, community partition and key players of one graph
///
/// Every node appears in each centrality mapping exactly once.
/// `eigenvector_centrality` is `None` when power iteration did not converge
/// and the caller asked for a lenient analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub degree_centrality: BTreeMap<String, f64>,
    pub betweenness_centrality: BTreeMap<String, f64>,
    pub eigenvector_centrality: Option<BTreeMap<String, f64>>,
    pub communities: Vec<Vec<String>>,
    pub key_players: Vec<String>,
}

impl AnalysisResult {
    /// Position of the community containing `subject`
    pub fn community_of(&self, subject: &str) -> Option<usize> {
        self.communities
            .iter()
            .position(|c| c.iter().any(|s| s == subject))
    }

    pub fn has_eigenvector(&self) -> bool {
        self.eigenvector_centrality.is_some()
    }

    /// Eigenvector value for `subject`, if computed
    pub fn eigenvector(&self, subject: &str) -> Option<f64> {
        self.eigenvector_centrality
            .as_ref()
            .and_then(|m| m.get(subject).copied())
    }
}
