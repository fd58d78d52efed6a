//! tidio-mcp - MCP server for the Tidio customer support platform
//!
//! This binary runs as an MCP server using stdio transport, allowing
//! Claude Code or Claude Desktop to work with Tidio tickets through
//! natural language.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `TIDIO_CLIENT_ID`: OpenAPI client ID
//! - `TIDIO_CLIENT_SECRET`: OpenAPI client secret
//! - `TIDIO_API_BASE_URL`: optional API origin override
//!
//! # Usage
//!
//! ```bash
//! TIDIO_CLIENT_ID=xxx TIDIO_CLIENT_SECRET=yyy ./tidio-mcp
//! ```

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, EnvFilter};

use tidio_mcp::config::Config;
use tidio_mcp::server::TidioServer;
use tidio_mcp::tidio_client::TidioClient;

const DEFAULT_LOG_FILTER: &str = "tidio_mcp=info";

/// Logs go to stderr: stdout carries the MCP JSON-RPC stream.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Builds the API client and probes `/departments` once.
///
/// A failed probe is logged, not returned: tools still report their own
/// errors once the API becomes reachable or credentials are fixed.
async fn connect(config: &Config) -> Result<TidioClient> {
    let client = TidioClient::new(config).context("Failed to create Tidio client")?;

    if let Err(e) = client.test_connection().await {
        tracing::error!(error = %e, "Tidio connection test failed");
        tracing::warn!("Starting anyway; tool calls will surface Tidio API errors");
    }

    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Tidio MCP server");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(
        base_url = %config.base_url,
        has_client_id = !config.client_id.is_empty(),
        has_client_secret = !config.client_secret().is_empty(),
        "Configuration loaded"
    );

    let client = connect(&config).await?;

    let service = TidioServer::new(client)
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {:?}", e))
        .context("Failed to start server")?;

    tracing::info!("Serving MCP over stdio");

    service
        .waiting()
        .await
        .context("Server error during operation")?;

    tracing::info!("Server shutting down");

    Ok(())
}
