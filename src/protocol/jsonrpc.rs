//! JSON-RPC 2.0 protocol types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

#[derive(Deserialize, Debug, Clone)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_valid(&self) -> bool {
        self.jsonrpc == "2.0"
    }

    /// Notifications carry no id and get no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Serialize, Debug)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub result: Value,
}

impl JsonRpcResponse {
    pub fn new(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct JsonRpcError {
    pub jsonrpc: String,
    pub id: Value,
    pub error: ErrorObject,
}

impl JsonRpcError {
    pub fn new(id: Value, code: i32, message: &str, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            error: ErrorObject {
                code,
                message: message.to_string(),
                data,
            },
        }
    }

    pub fn parse_error(details: String) -> Self {
        Self::new(
            Value::Null,
            error_codes::PARSE_ERROR,
            "Parse error",
            Some(json!({"details": details})),
        )
    }

    pub fn invalid_request(id: Value, details: &str) -> Self {
        Self::new(
            id,
            error_codes::INVALID_REQUEST,
            "Invalid Request",
            Some(json!({"details": details})),
        )
    }

    pub fn method_not_found(id: Value, method: &str) -> Self {
        Self::new(
            id,
            error_codes::METHOD_NOT_FOUND,
            "Method not found",
            Some(json!({"method": method})),
        )
    }

    pub fn invalid_params(id: Value, details: &str) -> Self {
        Self::new(
            id,
            error_codes::INVALID_PARAMS,
            "Invalid params",
            Some(json!({"details": details})),
        )
    }

    /// A tool failed while executing
    pub fn tool_error(id: Value, details: String) -> Self {
        Self::new(
            id,
            error_codes::INTERNAL_ERROR,
            "Tool execution error",
            Some(json!({"details": details})),
        )
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
