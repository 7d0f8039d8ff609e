//! Extracted record types consumed by the engine

use serde::{Deserialize, Serialize};

/// Character offsets of a mention in its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

impl Span {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Distance between the start offsets of two spans
    pub fn start_distance(&self, other: &Span) -> u64 {
        self.start.abs_diff(other.start)
    }
}

/// One extracted entity/event unit
///
/// Produced by an extraction collaborator (regex, POS chunking or a
/// token-classification model). `subject` must be non-empty; `label` is
/// drawn from whatever closed category set the collaborator uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub subject: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Record {
    /// Create a record without date or span
    pub fn new(subject: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            label: label.into(),
            date_text: None,
            span: None,
        }
    }

    /// Builder-style date attachment
    pub fn with_date(mut self, date_text: impl Into<String>) -> Self {
        self.date_text = Some(date_text.into());
        self
    }

    /// Builder-style span attachment
    pub fn with_span(mut self, start: u64, end: u64) -> Self {
        self.span = Some(Span::new(start, end));
        self
    }

    /// Raw date text, empty when absent
    pub fn date_str(&self) -> &str {
        self.date_text.as_deref().unwrap_or("")
    }

    /// Whether the record satisfies the non-empty subject invariant
    pub fn is_valid(&self) -> bool {
        !self.subject.is_empty()
    }
}

/// Token-classification output: one grouped entity with offsets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NerEntity {
    pub entity: String,
    pub word: String,
    pub start: u64,
    pub end: u64,
}

impl From<NerEntity> for Record {
    fn from(ner: NerEntity) -> Self {
        Record {
            subject: ner.word,
            label: ner.entity,
            date_text: None,
            span: Some(Span::new(ner.start, ner.end)),
        }
    }
}

/// A `(person, event, date)` extraction triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventTriple {
    pub person: String,
    pub event: String,
    #[serde(default)]
    pub date: String,
}

impl EventTriple {
    pub fn new(
        person: impl Into<String>,
        event: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            person: person.into(),
            event: event.into(),
            date: date.into(),
        }
    }
}

impl From<EventTriple> for Record {
    fn from(triple: EventTriple) -> Self {
        Record {
            subject: triple.person,
            label: triple.event,
            date_text: (!triple.date.is_empty()).then_some(triple.date),
            span: None,
        }
    }
}
