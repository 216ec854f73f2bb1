//! Provider directory MCP server.
//!
//! Serves FHIR provider-directory search and read tools over stdio.

use clap::Parser;
use helios_directory_mcp::{DirectoryConfig, DirectoryMcpServer, init_logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DirectoryConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        server_url = %config.server_url,
        request_timeout = config.request_timeout,
        search_timeout = ?config.search_timeout,
        max_page_size = config.max_page_size,
        "Starting provider directory MCP server"
    );

    let server = DirectoryMcpServer::from_config(&config)?;
    server.serve_stdio().await?;

    Ok(())
}
