//! HTTP service answering green routing requests over a preloaded model

mod api;
mod config;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zelenasled_core::create_routing_model;

use crate::{
    api::{AppState, build_router},
    config::ServerConfig,
};

#[derive(Debug, Parser)]
#[command(version, about = "Environmentally-aware walking and cycling routes")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Address to listen on, overrides `server.bind`
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::load(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let model_config = config.model.clone();
    let model =
        tokio::task::spawn_blocking(move || create_routing_model(&model_config)).await??;

    let app = build_router(Arc::new(AppState { model }), &config.server);
    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
