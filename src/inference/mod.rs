//! Relation inference between extracted records
//!
//! A relation policy decides, for one pair of records, whether the graph
//! should connect their subjects and with what justification text. Exactly
//! one policy is used per assembly run; policies are never combined.

pub mod rules;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Record;

pub use rules::{ProximityTypePolicy, SharedTypePolicy, DEFAULT_PROXIMITY_DISTANCE};

/// Trait for pairwise relation policies
///
/// Implementations must be pure: the same pair always yields the same answer.
pub trait RelationPolicy: Send + Sync {
    /// Get the name of this policy
    fn name(&self) -> &str;

    /// Relation label for the pair, or `None` when unrelated.
    ///
    /// Never called with the same record instance on both sides.
    fn relate(&self, a: &Record, b: &Record) -> Option<String>;
}

/// Selectable policy identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Same label and span starts closer than the configured distance
    Proximity,
    /// Same label
    #[default]
    SharedType,
}

impl PolicyKind {
    /// Instantiate the policy; `distance` only applies to `Proximity`
    pub fn build(self, distance: u64) -> Box<dyn RelationPolicy> {
        match self {
            PolicyKind::Proximity => Box::new(ProximityTypePolicy::new(distance)),
            PolicyKind::SharedType => Box::new(SharedTypePolicy),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Proximity => "proximity",
            PolicyKind::SharedType => "shared_type",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "proximity" | "proximity_type" => Ok(PolicyKind::Proximity),
            "shared_type" | "type" => Ok(PolicyKind::SharedType),
            other => Err(format!(
                "unknown relation policy '{}', expected 'proximity' or 'shared_type'",
                other
            )),
        }
    }
}
