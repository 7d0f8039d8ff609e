//! Entity Graph tool server - Binary Entry Point
//!
//! Serves the engine tools over stdio. Logs go to stderr so stdout stays a
//! clean JSON-RPC channel; set `RUST_LOG` to adjust verbosity.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use entity_graph::config::EngineConfig;
use entity_graph::protocol::ServerInfo;
use entity_graph::server::McpServer;
use entity_graph::tools::register_all_tools;
use entity_graph::types::McpResult;

fn main() -> McpResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Arc::new(EngineConfig::from_env());
    tracing::info!(?config, "configuration loaded");

    let mut server = McpServer::with_info(ServerInfo::default());
    register_all_tools(&mut server, config);

    server.run()
}
