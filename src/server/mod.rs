//! JSON-RPC tool server over line-delimited stdio
//!
//! One request per line in, one response per line out. Notifications get no
//! response. The loop ends at end of input or on an I/O error.

mod handlers;

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::{json, Value};

use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpTool, ServerInfo, Tool, PROTOCOL_VERSION,
};
use crate::types::McpResult;

pub use handlers::*;

pub struct McpServer {
    server_info: ServerInfo,
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl McpServer {
    pub fn new() -> Self {
        Self::with_info(ServerInfo::default())
    }

    pub fn with_info(info: ServerInfo) -> Self {
        Self {
            server_info: info,
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register_tool(&mut self, tool: Box<dyn Tool>) -> &mut Self {
        let name = tool.name();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "replaced previously registered tool");
        }
        self
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Serve stdin/stdout until end of input (blocking)
    pub fn run(&self) -> McpResult<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), io::BufWriter::new(stdout.lock()))
    }

    /// Serve requests read from `reader`, writing responses to `writer`
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> McpResult<()> {
        tracing::info!(
            name = %self.server_info.name,
            version = %self.server_info.version,
            tools = self.tools.len(),
            "tool server ready"
        );

        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                if let Some(response) = self.handle_line(trimmed) {
                    writeln!(writer, "{}", response)?;
                    writer.flush()?;
                }
            }
            line.clear();
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one request line, returning the serialized response if any
    pub fn handle_line(&self, request_str: &str) -> Option<String> {
        let response = match serde_json::from_str::<JsonRpcRequest>(request_str) {
            Ok(request) => self.handle_request(request)?,
            Err(e) => {
                tracing::debug!(error = %e, "unparseable request");
                encode(&JsonRpcError::parse_error(e.to_string()))
            }
        };
        Some(response)
    }

    fn handle_request(&self, request: JsonRpcRequest) -> Option<String> {
        let id = request.id.clone().unwrap_or(Value::Null);
        let notification = request.is_notification();

        if !request.is_valid() {
            if notification {
                tracing::debug!("ignoring notification with invalid jsonrpc version");
                return None;
            }
            return Some(encode(&JsonRpcError::invalid_request(
                id,
                "jsonrpc must be '2.0'",
            )));
        }

        tracing::debug!(method = %request.method, "request");

        let response = match request.method.as_str() {
            "initialize" => encode(&JsonRpcResponse::new(id, self.initialize_result())),
            "tools/list" => encode(&JsonRpcResponse::new(id, self.tools_list_result())),
            "tools/call" => self.handle_tool_call(id, request.params),
            "ping" => encode(&JsonRpcResponse::new(id, json!({}))),
            _ if notification => return None,
            method => encode(&JsonRpcError::method_not_found(id, method)),
        };

        if notification {
            return None;
        }
        Some(response)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.server_info.name,
                "version": self.server_info.version
            }
        })
    }

    fn tools_list_result(&self) -> Value {
        let tools: Vec<McpTool> = self.tools.values().map(|t| t.definition()).collect();
        json!({ "tools": tools })
    }

    fn handle_tool_call(&self, id: Value, params: Option<Value>) -> String {
        let Some(params) = params else {
            return encode(&JsonRpcError::invalid_params(id, "Missing parameters"));
        };
        let Some(tool_name) = extract_tool_name(&params) else {
            return encode(&JsonRpcError::invalid_params(id, "Missing tool name"));
        };
        let Some(tool) = self.tools.get(tool_name) else {
            return encode(&JsonRpcError::new(
                id,
                crate::protocol::error_codes::INVALID_PARAMS,
                "Unknown tool",
                Some(json!({"tool": tool_name})),
            ));
        };

        match tool.execute(extract_arguments(&params)) {
            Ok(result) => encode(&JsonRpcResponse::new(id, result)),
            Err(e) => {
                tracing::warn!(tool = %tool_name, error = %e, "tool execution failed");
                encode(&JsonRpcError::tool_error(id, e.to_string()))
            }
        }
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn encode<T: Serialize>(message: &T) -> String {
    serde_json::to_string(message).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to encode response");
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": crate::protocol::error_codes::INTERNAL_ERROR, "message": "Internal error"}
        })
        .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    impl Tool for EchoTool {
        fn definition(&self) -> McpTool {
            McpTool {
                name: "echo".to_string(),
                description: "Echo arguments".to_string(),
                input_schema: json!({"type": "object"}),
            }
        }

        fn execute(&self, params: Value) -> McpResult<Value> {
            if params.get("fail").is_some() {
                return Err("asked to fail".into());
            }
            Ok(text_response(params.to_string()))
        }
    }

    fn server() -> McpServer {
        let mut server = McpServer::new();
        server.register_tool(Box::new(EchoTool));
        server
    }

    fn call(server: &McpServer, request: Value) -> Value {
        let line = server.handle_line(&request.to_string()).unwrap();
        serde_json::from_str(&line).unwrap()
    }

    #[test]
    fn test_initialize() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}));
        assert_eq!(response["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], crate::NAME);
    }

    #[test]
    fn test_tools_list() {
        let response = call(&server(), json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}));
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "echo");
        assert!(tools[0].get("inputSchema").is_some());
    }

    #[test]
    fn test_tool_call_and_failure() {
        let server = server();
        let ok = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "echo", "arguments": {"x": 1}}}),
        );
        assert_eq!(ok["result"]["content"][0]["text"], r#"{"x":1}"#);

        let failed = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "echo", "arguments": {"fail": true}}}),
        );
        assert_eq!(failed["error"]["code"], -32603);
        assert_eq!(failed["error"]["data"]["details"], "asked to fail");
    }

    #[test]
    fn test_protocol_errors() {
        let server = server();
        let parse = serde_json::from_str::<Value>(&server.handle_line("{nope").unwrap()).unwrap();
        assert_eq!(parse["error"]["code"], -32700);

        let version = call(&server, json!({"jsonrpc": "1.0", "id": 5, "method": "ping"}));
        assert_eq!(version["error"]["code"], -32600);

        let unknown = call(&server, json!({"jsonrpc": "2.0", "id": 6, "method": "graph/explode"}));
        assert_eq!(unknown["error"]["code"], -32601);

        let no_tool = call(
            &server,
            json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {"name": "missing"}}),
        );
        assert_eq!(no_tool["error"]["code"], -32602);

        let no_params = call(&server, json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call"}));
        assert_eq!(no_params["error"]["code"], -32602);
    }

    #[test]
    fn test_notifications_get_no_response() {
        let server = server();
        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .is_none());
    }

    #[test]
    fn test_invalid_version_notification_gets_no_response() {
        let server = server();
        assert!(server
            .handle_line(r#"{"jsonrpc":"1.0","method":"notifications/initialized"}"#)
            .is_none());
        assert!(server.handle_line(r#"{"jsonrpc":"1.0","id":9,"method":"ping"}"#).is_some());
    }

    #[test]
    fn test_serve_loop() {
        let server = server();
        let input = "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\n\
                     {\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n\
                     {\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"id\":1"));
        assert!(lines[1].contains("\"id\":2"));
    }
}
