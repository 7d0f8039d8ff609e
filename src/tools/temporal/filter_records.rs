//! Filter records tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::EngineConfig;
use crate::protocol::{McpTool, Tool};
use crate::server::text_response;
use crate::temporal::{filter_by_year_range, limit};
use crate::types::McpResult;

use super::super::args::{limit_arg, records_arg, records_schema, year_arg};

/// Tool for restricting records to an inclusive year range
pub struct FilterRecordsTool {
    config: Arc<EngineConfig>,
}

impl FilterRecordsTool {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Tool for FilterRecordsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "filter_records".to_string(),
            description: "Keep records whose normalized year falls within [startYear, endYear] inclusive, then cap the result. Records without a recognizable year are dropped.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "records": records_schema("Records to filter"),
                    "startYear": {"type": "integer"},
                    "endYear": {"type": "integer"},
                    "limit": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Maximum number of records to return. Defaults to the server configuration."
                    }
                },
                "required": ["records", "startYear", "endYear"]
            }),
        }
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let records = records_arg(&params, "records")?;
        let start_year = year_arg(&params, "startYear")?;
        let end_year = year_arg(&params, "endYear")?;
        let max_count = limit_arg(&params, &self.config);

        let filtered = filter_by_year_range(&records, start_year, end_year);
        let limited = limit(filtered, max_count);

        let mut text = serde_json::to_string_pretty(&json!({
            "records": &limited.items,
            "matched": limited.original_len,
            "truncated": limited.truncated
        }))?;
        if limited.truncated {
            text.push_str(&format!(
                "\n\nNote: showing {} of {} matching records; {} omitted.",
                limited.items.len(),
                limited.original_len,
                limited.dropped()
            ));
        }

        Ok(text_response(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> FilterRecordsTool {
        FilterRecordsTool::new(Arc::new(EngineConfig::default()))
    }

    fn text(response: &Value) -> &str {
        response["content"][0]["text"].as_str().unwrap()
    }

    fn records() -> Value {
        json!([
            {"subject": "A", "label": "EVENT", "date_text": "1900"},
            {"subject": "B", "label": "EVENT", "date_text": "1950"},
            {"subject": "C", "label": "EVENT", "date_text": "2000"},
            {"subject": "D", "label": "EVENT"}
        ])
    }

    #[test]
    fn test_filter_range() {
        let response = tool()
            .execute(json!({"records": records(), "startYear": 1940, "endYear": 1960}))
            .unwrap();
        let payload: Value = serde_json::from_str(text(&response)).unwrap();
        assert_eq!(payload["records"].as_array().unwrap().len(), 1);
        assert_eq!(payload["records"][0]["subject"], "B");
        assert_eq!(payload["truncated"], false);
    }

    #[test]
    fn test_truncation_note() {
        let response = tool()
            .execute(json!({"records": records(), "startYear": 1800, "endYear": 2100, "limit": 2}))
            .unwrap();
        let text = text(&response);
        assert!(text.contains("\"truncated\": true"));
        assert!(text.contains("showing 2 of 3 matching records; 1 omitted"));
    }

    #[test]
    fn test_missing_years() {
        assert!(tool().execute(json!({"records": records(), "startYear": 1900})).is_err());
    }
}
