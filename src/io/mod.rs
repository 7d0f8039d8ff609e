//! Record ingestion and JSON persistence
//!
//! Extraction collaborators hand over JSON: an array, a single object, or
//! one object per line when the producer streams. Records, graphs and
//! analysis results are written back as pretty-printed JSON so runs can be
//! diffed.

mod atomic;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineResult;
use crate::types::{EventTriple, NerEntity, Record};

pub use atomic::atomic_write;

/// Accepted shapes for one extracted item
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Record(Record),
    Ner(NerEntity),
    Triple(EventTriple),
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        match raw {
            RawRecord::Record(r) => r,
            RawRecord::Ner(n) => n.into(),
            RawRecord::Triple(t) => t.into(),
        }
    }
}

fn from_value(value: Value) -> Option<Record> {
    match serde_json::from_value::<RawRecord>(value) {
        Ok(raw) => Some(raw.into()),
        Err(e) => {
            tracing::debug!(error = %e, "skipping item that is not a record");
            None
        }
    }
}

fn keep_valid(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| {
            let valid = r.is_valid();
            if !valid {
                tracing::warn!(label = %r.label, "dropping extracted record with empty subject");
            }
            valid
        })
        .collect()
}

/// Parse extraction output into records.
///
/// Items may be records, token-classification entities
/// (`entity`/`word`/`start`/`end`) or `person`/`event`/`date` triples.
/// Unparseable items and lines are skipped; an empty result means nothing
/// usable was found.
pub fn parse_records(text: &str) -> Vec<Record> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Array(_) | Value::Object(_))) => records_from_value(value),
        Ok(_) | Err(_) => {
            let records = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .filter_map(|line| serde_json::from_str::<Value>(line).ok())
                .filter_map(from_value)
                .collect();
            finish(records)
        }
    }
}

/// Records from an already-parsed JSON array or object.
///
/// A string value is treated as raw extraction output.
pub fn records_from_value(value: Value) -> Vec<Record> {
    let records = match value {
        Value::Array(items) => items.into_iter().filter_map(from_value).collect(),
        value @ Value::Object(_) => from_value(value).into_iter().collect(),
        Value::String(text) => return parse_records(&text),
        _ => Vec::new(),
    };
    finish(records)
}

fn finish(records: Vec<Record>) -> Vec<Record> {
    let records = keep_valid(records);
    if records.is_empty() {
        tracing::warn!("no records found in extraction output");
    }
    records
}

/// Write any serializable value as pretty JSON
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, value: &T) -> EngineResult<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    atomic_write(path, &content)
}

/// Read a JSON array of records written by [`save_json`]
pub fn load_records<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Record>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<Record> = serde_json::from_str(&content)?;
    Ok(keep_valid(records))
}
