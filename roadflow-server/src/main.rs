//! HTTP boundary for the routing engine: route queries, the traffic-update
//! channel, edge blocking, and the analytics read-model. No algorithmic
//! logic lives here.

mod config;
mod error;
mod handlers;
mod state;

use std::path::PathBuf;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "roadflow-server", about = "Traffic-aware routing API")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "roadflow.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    let network = roadflow_core::loading::load_network(&config.network_path)?;
    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "network loaded from {}",
        config.network_path.display()
    );

    let state = AppState::new(network, config.top_congested);
    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("listening on {}", config.listen);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler");
    }
}
