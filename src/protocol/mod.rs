//! Protocol types for the JSON-RPC tool server

mod jsonrpc;
mod mcp;

pub use jsonrpc::{error_codes, ErrorObject, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use mcp::{McpTool, ServerInfo, Tool, PROTOCOL_VERSION};
