//! Onchain Relay - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Forwards dashboard calls to arbitrary origins on /api/proxy
//! - Runs provider search with TLDR enrichment on /api/search
//! - Serves the templated summarizer on /api/summary

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod router;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone())),
        )
        .init();

    info!("Onchain Relay starting on port {}...", cli.port);
    if cli.search_api_key.is_empty() {
        tracing::warn!("No search API key configured; /api/search will be rejected upstream");
    }

    let state = AppState::new(&cli)?;
    let app = router::build_router(state);

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("API available at http://{}/api/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
