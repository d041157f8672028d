use clihist_lib::HistoryServer;
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP transport, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("starting clihist MCP server");

    let server = HistoryServer::bootstrap().await;
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
