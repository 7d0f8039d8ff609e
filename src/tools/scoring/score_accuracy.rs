//! Score accuracy tool

use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::scoring::score_report;
use crate::server::json_response;
use crate::types::McpResult;

use super::super::args::{records_arg, records_schema};

/// Tool comparing extracted records against a reference set
pub struct ScoreAccuracyTool;

impl ScoreAccuracyTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScoreAccuracyTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ScoreAccuracyTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "score_accuracy".to_string(),
            description: "Exact-match accuracy of extracted records against a reference set, keyed on (subject, label, date_text). Returns the percentage of reference keys found plus the missing and unexpected keys.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "extracted": records_schema("Records produced by extraction"),
                    "reference": records_schema("Ground-truth records")
                },
                "required": ["extracted", "reference"]
            }),
        }
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let extracted = records_arg(&params, "extracted")?;
        let reference = records_arg(&params, "reference")?;

        let report = score_report(&extracted, &reference);
        tracing::info!(
            accuracy = report.accuracy,
            matched = report.matched,
            reference = report.reference_total,
            "accuracy scored"
        );

        json_response(&report)
    }
}
