//! Year-range filtering, truncation and date-range queries

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::types::Record;

use super::normalize_year;

/// Default cap applied by [`limit`]
pub const DEFAULT_MAX_RECORDS: usize = 50;

/// Output of [`limit`]: the kept items and whether anything was cut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limited<T> {
    pub items: Vec<T>,
    pub truncated: bool,
    pub original_len: usize,
}

impl<T> Limited<T> {
    /// Number of items dropped by truncation
    pub fn dropped(&self) -> usize {
        self.original_len - self.items.len()
    }
}

/// One point on an event timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: i32,
    pub subject: String,
    pub label: String,
}

/// Keep records whose normalized year falls in `[start_year, end_year]`.
///
/// Records with an unknown year are dropped.
pub fn filter_by_year_range(records: &[Record], start_year: i32, end_year: i32) -> Vec<Record> {
    if start_year > end_year {
        tracing::warn!(start_year, end_year, "empty year range, nothing can match");
    }

    let kept: Vec<Record> = records
        .iter()
        .filter(|r| normalize_year(r.date_text.as_deref()).within(start_year, end_year))
        .cloned()
        .collect();

    tracing::debug!(
        input = records.len(),
        kept = kept.len(),
        start_year,
        end_year,
        "filtered records by year"
    );
    kept
}

/// Keep the first `max_count` items in input order.
///
/// Truncation is advisory: it is flagged on the result and logged, never
/// treated as an error.
pub fn limit<T>(mut items: Vec<T>, max_count: usize) -> Limited<T> {
    let original_len = items.len();
    let truncated = original_len > max_count;
    if truncated {
        items.truncate(max_count);
        tracing::warn!(
            original_len,
            max_count,
            "record collection truncated to the first {} items",
            max_count
        );
    }
    Limited {
        items,
        truncated,
        original_len,
    }
}

/// Smallest and largest known year across `records`.
///
/// Fails with [`EngineError::NoValidDates`] when no record has a known year.
pub fn get_date_range(records: &[Record]) -> EngineResult<(i32, i32)> {
    records
        .iter()
        .filter_map(|r| normalize_year(r.date_text.as_deref()).as_year())
        .fold(None, |range, year| match range {
            None => Some((year, year)),
            Some((min, max)) => Some((min.min(year), max.max(year))),
        })
        .ok_or(EngineError::NoValidDates)
}

/// Records with a known year, ordered by year then input order
pub fn timeline(records: &[Record]) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = records
        .iter()
        .filter_map(|r| {
            normalize_year(r.date_text.as_deref())
                .as_year()
                .map(|year| TimelineEntry {
                    year,
                    subject: r.subject.clone(),
                    label: r.label.clone(),
                })
        })
        .collect();
    // stable: ties keep input order
    entries.sort_by_key(|e| e.year);
    entries
}
