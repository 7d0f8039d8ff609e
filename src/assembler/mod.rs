//! Graph assembly
//!
//! Each call builds a fresh graph from a record collection; nothing is
//! carried over between calls.

mod bipartite;
mod pairwise;

pub use bipartite::{build_person_event_graph, EVENT_LABEL, PARTICIPATION_RELATION, PERSON_LABEL};
pub use pairwise::build_graph;
