//! Normalized year type

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar year or the explicit `Unknown` sentinel
///
/// Serializes as a bare integer, or as the string `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum NormalizedYear {
    Year(i32),
    #[default]
    Unknown,
}

impl NormalizedYear {
    pub fn is_known(&self) -> bool {
        matches!(self, NormalizedYear::Year(_))
    }

    pub fn as_year(&self) -> Option<i32> {
        match self {
            NormalizedYear::Year(y) => Some(*y),
            NormalizedYear::Unknown => None,
        }
    }

    /// Inclusive range check; `Unknown` is never in range
    pub fn within(&self, start: i32, end: i32) -> bool {
        self.as_year().is_some_and(|y| y >= start && y <= end)
    }
}

impl From<i32> for NormalizedYear {
    fn from(year: i32) -> Self {
        NormalizedYear::Year(year)
    }
}

impl fmt::Display for NormalizedYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedYear::Year(y) => write!(f, "{}", y),
            NormalizedYear::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Serialize for NormalizedYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NormalizedYear::Year(y) => serializer.serialize_i32(*y),
            NormalizedYear::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for NormalizedYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Year(i32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Year(y) => Ok(NormalizedYear::Year(y)),
            Repr::Text(s) if s == "Unknown" => Ok(NormalizedYear::Unknown),
            Repr::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a year or \"Unknown\", got '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_is_inclusive() {
        let year = NormalizedYear::Year(1950);
        assert!(year.within(1950, 1960));
        assert!(year.within(1940, 1950));
        assert!(!year.within(1951, 1960));
        assert!(!NormalizedYear::Unknown.within(i32::MIN, i32::MAX));
    }

    #[test]
    fn test_serde_representation() {
        assert_eq!(serde_json::to_string(&NormalizedYear::Year(1843)).unwrap(), "1843");
        assert_eq!(
            serde_json::to_string(&NormalizedYear::Unknown).unwrap(),
            "\"Unknown\""
        );

        let parsed: NormalizedYear = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(parsed, NormalizedYear::Unknown);
        let parsed: NormalizedYear = serde_json::from_str("2000").unwrap();
        assert_eq!(parsed, NormalizedYear::Year(2000));
        assert!(serde_json::from_str::<NormalizedYear>("\"soon\"").is_err());
    }
}
