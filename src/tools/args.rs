//! Argument readers shared by the engine tools

use serde_json::Value;

use crate::config::EngineConfig;
use crate::inference::{PolicyKind, RelationPolicy};
use crate::io::records_from_value;
use crate::temporal::{limit, Limited};
use crate::types::{McpResult, Record};

/// Records under `key`: an array, a single object, or raw extraction text
pub fn records_arg(params: &Value, key: &str) -> McpResult<Vec<Record>> {
    let value = params
        .get(key)
        .cloned()
        .ok_or_else(|| format!("Missing {}", key))?;
    Ok(records_from_value(value))
}

/// Records under `key` capped by the `limit` argument or `max_records`.
///
/// Pairwise assembly and community detection grow super-linearly, so the
/// graph tools never see more than the cap.
pub fn bounded_records_arg(
    params: &Value,
    key: &str,
    config: &EngineConfig,
) -> McpResult<Limited<Record>> {
    let records = records_arg(params, key)?;
    Ok(limit(records, limit_arg(params, config)))
}

/// `limit` argument, falling back to `max_records`
pub fn limit_arg(params: &Value, config: &EngineConfig) -> usize {
    params
        .get("limit")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(config.max_records)
}

/// Warning text for a truncated input, if any
pub fn truncation_warning<T>(limited: &Limited<T>) -> Option<String> {
    limited.truncated.then(|| {
        format!(
            "input truncated to the first {} of {} records; {} omitted",
            limited.items.len(),
            limited.original_len,
            limited.dropped()
        )
    })
}

/// `policy` and `proximity` arguments, falling back to the config
pub fn policy_arg(params: &Value, config: &EngineConfig) -> McpResult<Box<dyn RelationPolicy>> {
    let kind = match params.get("policy").and_then(|v| v.as_str()) {
        Some(name) => name.parse::<PolicyKind>()?,
        None => config.policy,
    };
    let distance = params
        .get("proximity")
        .and_then(|v| v.as_u64())
        .unwrap_or(config.proximity_distance);
    Ok(kind.build(distance))
}

pub fn year_arg(params: &Value, key: &str) -> McpResult<i32> {
    let year = params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| format!("Missing {}", key))?;
    Ok(i32::try_from(year).map_err(|_| format!("{} out of range: {}", key, year))?)
}

/// JSON schema fragment for a records argument
pub fn records_schema(description: &str) -> Value {
    serde_json::json!({
        "description": description,
        "oneOf": [
            {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "subject": {"type": "string"},
                        "label": {"type": "string"},
                        "date_text": {"type": "string"},
                        "span": {
                            "type": "object",
                            "properties": {
                                "start": {"type": "integer", "minimum": 0},
                                "end": {"type": "integer", "minimum": 0}
                            }
                        }
                    }
                }
            },
            {"type": "string"}
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_arg() {
        let params = json!({"records": [{"subject": "Ada", "label": "PERSON"}]});
        assert_eq!(records_arg(&params, "records").unwrap().len(), 1);
        assert!(records_arg(&params, "reference").is_err());
    }

    #[test]
    fn test_bounded_records_arg() {
        let records: Vec<Value> = (0..8)
            .map(|i| json!({"subject": format!("E{}", i), "label": "X"}))
            .collect();
        let config = EngineConfig {
            max_records: 5,
            ..EngineConfig::default()
        };

        let limited = bounded_records_arg(&json!({"records": records}), "records", &config).unwrap();
        assert_eq!(limited.items.len(), 5);
        assert_eq!(
            truncation_warning(&limited).unwrap(),
            "input truncated to the first 5 of 8 records; 3 omitted"
        );

        let params = json!({"records": records, "limit": 10});
        let limited = bounded_records_arg(&params, "records", &config).unwrap();
        assert_eq!(limited.items.len(), 8);
        assert!(truncation_warning(&limited).is_none());
    }

    #[test]
    fn test_policy_arg() {
        let config = EngineConfig::default();
        let policy = policy_arg(&json!({}), &config).unwrap();
        assert_eq!(policy.name(), "SharedTypePolicy");

        let policy = policy_arg(&json!({"policy": "proximity", "proximity": 5}), &config).unwrap();
        assert_eq!(policy.name(), "ProximityTypePolicy");

        assert!(policy_arg(&json!({"policy": "vibes"}), &config).is_err());
    }

    #[test]
    fn test_year_arg() {
        assert_eq!(year_arg(&json!({"startYear": 1940}), "startYear").unwrap(), 1940);
        assert!(year_arg(&json!({"startYear": "1940"}), "startYear").is_err());
        assert!(year_arg(&json!({"startYear": 99999999999i64}), "startYear").is_err());
    }
}
