//! Tool server handshake and tool definitions

use serde::Serialize;
use serde_json::Value;

use crate::types::McpResult;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Tool definition as listed by `tools/list`
#[derive(Serialize, Debug, Clone)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Server information for the handshake
#[derive(Clone, Debug)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self::new(crate::NAME, crate::VERSION)
    }
}

/// A callable engine operation
///
/// Tools receive the `arguments` object of a `tools/call` request and
/// return the result content.
pub trait Tool: Send + Sync {
    fn definition(&self) -> McpTool;

    fn execute(&self, params: Value) -> McpResult<Value>;

    fn name(&self) -> String {
        self.definition().name
    }
}
