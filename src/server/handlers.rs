//! Helpers for reading `tools/call` params and shaping tool results

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::types::McpResult;

/// Tool arguments from `tools/call` params, `{}` when absent
pub fn extract_arguments(params: &Value) -> Value {
    params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

pub fn extract_tool_name(params: &Value) -> Option<&str> {
    params.get("name").and_then(|v| v.as_str())
}

/// Build a text content response
pub fn text_response(text: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text
        }]
    })
}

/// Text content holding pretty-printed JSON of `value`
pub fn json_response<T: Serialize + ?Sized>(value: &T) -> McpResult<Value> {
    Ok(text_response(serde_json::to_string_pretty(value)?))
}

/// Build an error content response
///
/// Used for conditions the caller must see but that are not protocol
/// failures, such as a record set with no valid dates.
pub fn error_response(message: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": format!("Error: {}", message)
        }],
        "isError": true
    })
}
