// Standalone Zoom MCP server binary

use anyhow::Result;
use zoomcp_mcp::{Dispatcher, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::info!("zoomcp MCP server starting");

    // No local OAuth configuration: all credentials arrive per tool
    // call in the arguments.
    let server = McpServer::new(Dispatcher::new());
    server.run().await
}
