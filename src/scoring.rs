//! Exact-match accuracy against a reference record set

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{EventTriple, Record};

/// Canonical comparison key: `(subject, label, date_text)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub subject: String,
    pub label: String,
    pub date_text: String,
}

impl From<&Record> for RecordKey {
    fn from(record: &Record) -> Self {
        Self {
            subject: record.subject.clone(),
            label: record.label.clone(),
            date_text: record.date_str().to_string(),
        }
    }
}

impl From<&EventTriple> for RecordKey {
    fn from(triple: &EventTriple) -> Self {
        Self {
            subject: triple.person.clone(),
            label: triple.event.clone(),
            date_text: triple.date.clone(),
        }
    }
}

/// Breakdown behind an accuracy score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub accuracy: f64,
    pub matched: usize,
    pub reference_total: usize,
    pub extracted_total: usize,
    /// Reference keys absent from the extracted set, sorted
    pub missing: Vec<RecordKey>,
    /// Extracted keys absent from the reference set, sorted
    pub unexpected: Vec<RecordKey>,
}

/// Compare two key collections; duplicates collapse to one key
pub fn score_keys<I, J>(extracted: I, reference: J) -> ScoreReport
where
    I: IntoIterator<Item = RecordKey>,
    J: IntoIterator<Item = RecordKey>,
{
    let extracted: HashSet<RecordKey> = extracted.into_iter().collect();
    let reference: HashSet<RecordKey> = reference.into_iter().collect();

    let matched = extracted.intersection(&reference).count();
    let accuracy = if reference.is_empty() {
        tracing::debug!("empty reference set, accuracy is 0");
        0.0
    } else {
        matched as f64 / reference.len() as f64 * 100.0
    };

    let mut missing: Vec<RecordKey> = reference.difference(&extracted).cloned().collect();
    missing.sort();
    let mut unexpected: Vec<RecordKey> = extracted.difference(&reference).cloned().collect();
    unexpected.sort();

    ScoreReport {
        accuracy,
        matched,
        reference_total: reference.len(),
        extracted_total: extracted.len(),
        missing,
        unexpected,
    }
}

/// Detailed comparison of extracted records against the reference
pub fn score_report(extracted: &[Record], reference: &[Record]) -> ScoreReport {
    score_keys(
        extracted.iter().map(RecordKey::from),
        reference.iter().map(RecordKey::from),
    )
}

/// Percentage of reference keys found in the extracted set, in `[0, 100]`.
///
/// An empty reference scores 0.
pub fn score(extracted: &[Record], reference: &[Record]) -> f64 {
    score_report(extracted, reference).accuracy
}

/// Same as [`score`] for `(person, event, date)` triples
pub fn score_triples(extracted: &[EventTriple], reference: &[EventTriple]) -> f64 {
    score_keys(
        extracted.iter().map(RecordKey::from),
        reference.iter().map(RecordKey::from),
    )
    .accuracy
}
