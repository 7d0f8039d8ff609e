//! Date text normalization

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::types::NormalizedYear;

/// A 4-digit run not attached to other digits
static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{4})(?:[^0-9]|$)").unwrap());

/// Parse heterogeneous date text into a year.
///
/// A strict `YYYY-MM-DD` parse wins; otherwise the first standalone 4-digit
/// token is taken; anything else is `Unknown`. Never fails.
pub fn normalize_year(date_text: Option<&str>) -> NormalizedYear {
    let Some(text) = date_text.map(str::trim).filter(|t| !t.is_empty()) else {
        return NormalizedYear::Unknown;
    };

    if text.len() == 10 {
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return NormalizedYear::Year(date.year());
        }
    }

    match YEAR_TOKEN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
    {
        Some(year) => NormalizedYear::Year(year),
        None => {
            tracing::debug!(date_text = text, "unrecognized date text, year unknown");
            NormalizedYear::Unknown
        }
    }
}
