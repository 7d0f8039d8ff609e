//! Relation policies
//!
//! This module contains the concrete pairwise policies.

use crate::types::Record;

use super::RelationPolicy;

/// Default proximity window, in character positions
pub const DEFAULT_PROXIMITY_DISTANCE: u64 = 100;

/// Proximity + type policy
///
/// Two records are related when they share a label and their span starts
/// are strictly closer than `max_distance`. A record without a span is
/// never related under this policy.
#[derive(Debug, Clone, Copy)]
pub struct ProximityTypePolicy {
    max_distance: u64,
}

impl ProximityTypePolicy {
    /// Create a policy with the given distance window
    pub fn new(max_distance: u64) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> u64 {
        self.max_distance
    }
}

impl Default for ProximityTypePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PROXIMITY_DISTANCE)
    }
}

impl RelationPolicy for ProximityTypePolicy {
    fn name(&self) -> &str {
        "ProximityTypePolicy"
    }

    fn relate(&self, a: &Record, b: &Record) -> Option<String> {
        if a.label != b.label {
            return None;
        }
        let (sa, sb) = (a.span.as_ref()?, b.span.as_ref()?);
        (sa.start_distance(sb) < self.max_distance).then(|| {
            format!(
                "{} and {} are related due to their type and proximity.",
                a.subject, b.subject
            )
        })
    }
}

/// Shared-type policy: same label, spans ignored
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedTypePolicy;

impl RelationPolicy for SharedTypePolicy {
    fn name(&self) -> &str {
        "SharedTypePolicy"
    }

    fn relate(&self, a: &Record, b: &Record) -> Option<String> {
        (a.label == b.label).then(|| format!("Shared type: {}", a.label))
    }
}
