//! Typed signals surfaced by the engine
//!
//! Malformed dates and empty reference sets are recovered where they occur
//! and never show up here.

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No record in the collection carries a recognizable year
    #[error("no valid dates in collection")]
    NoValidDates,

    /// Power iteration exceeded its cap
    #[error("eigenvector centrality did not converge within {iterations} iterations")]
    EigenvectorNonConvergence { iterations: usize },

    /// Eigenvector centrality is undefined on a graph without nodes
    #[error("cannot compute eigenvector centrality of an empty graph")]
    EmptyGraph,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Whether the caller can still use the non-eigenvector metrics
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            EngineError::EigenvectorNonConvergence { .. } | EngineError::EmptyGraph
        )
    }
}
