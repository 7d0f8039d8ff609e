//! Date range tool

use serde_json::{json, Value};

use crate::error::EngineError;
use crate::protocol::{McpTool, Tool};
use crate::server::{error_response, json_response};
use crate::temporal::get_date_range;
use crate::types::McpResult;

use super::super::args::{records_arg, records_schema};

/// Tool reporting the earliest and latest known year in a record set
pub struct DateRangeTool;

impl DateRangeTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateRangeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for DateRangeTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "date_range".to_string(),
            description: "Get the minimum and maximum normalized year over records with a recognizable date. Reports an error when no record has one.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "records": records_schema("Records to inspect")
                },
                "required": ["records"]
            }),
        }
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let records = records_arg(&params, "records")?;

        match get_date_range(&records) {
            Ok((min_year, max_year)) => json_response(&json!({
                "min_year": min_year,
                "max_year": max_year
            })),
            Err(err @ EngineError::NoValidDates) => Ok(error_response(err.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}
