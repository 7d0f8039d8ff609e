//! Engine configuration
//!
//! Sensible defaults, overridable from the environment:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `ENTITY_GRAPH_POLICY` | `policy` | `shared_type` |
//! | `ENTITY_GRAPH_PROXIMITY` | `proximity_distance` | 100 |
//! | `ENTITY_GRAPH_MAX_RECORDS` | `max_records` | 50 |
//! | `ENTITY_GRAPH_TOP_K` | `top_k` | 5 |
//! | `ENTITY_GRAPH_EIGEN_MAX_ITER` | `eigenvector_max_iter` | 1000 |
//! | `ENTITY_GRAPH_EIGEN_TOLERANCE` | `eigenvector_tolerance` | 1e-6 |

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analytics::{DEFAULT_MAX_ITER, DEFAULT_TOLERANCE, DEFAULT_TOP_K};
use crate::inference::{PolicyKind, RelationPolicy, DEFAULT_PROXIMITY_DISTANCE};
use crate::temporal::DEFAULT_MAX_RECORDS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: PolicyKind,
    pub proximity_distance: u64,
    pub max_records: usize,
    pub top_k: usize,
    pub eigenvector_max_iter: usize,
    pub eigenvector_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            proximity_distance: DEFAULT_PROXIMITY_DISTANCE,
            max_records: DEFAULT_MAX_RECORDS,
            top_k: DEFAULT_TOP_K,
            eigenvector_max_iter: DEFAULT_MAX_ITER,
            eigenvector_tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Load from environment variables, keeping defaults for anything unset
    /// or unparseable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test maps)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_from(&lookup, "ENTITY_GRAPH_POLICY", &mut config.policy);
        override_from(&lookup, "ENTITY_GRAPH_PROXIMITY", &mut config.proximity_distance);
        override_from(&lookup, "ENTITY_GRAPH_MAX_RECORDS", &mut config.max_records);
        override_from(&lookup, "ENTITY_GRAPH_TOP_K", &mut config.top_k);
        override_from(&lookup, "ENTITY_GRAPH_EIGEN_MAX_ITER", &mut config.eigenvector_max_iter);
        override_from(&lookup, "ENTITY_GRAPH_EIGEN_TOLERANCE", &mut config.eigenvector_tolerance);
        config
    }

    /// The configured relation policy
    pub fn relation_policy(&self) -> Box<dyn RelationPolicy> {
        self.policy.build(self.proximity_distance)
    }
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring unparseable setting, keeping default"),
    }
}
