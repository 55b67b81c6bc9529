//! HTTP server for the ride-pooling matcher.
//!
//! Run with: cargo run -p pool_service --bin pool_server

use std::sync::Arc;

use anyhow::Context;
use pool_service::config::ServerConfig;
use pool_service::server::{router, AppState};
use pool_service::store::FleetStore;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ServerConfig::from_env()?;
    let state = Arc::new(AppState::new(FleetStore::new()));
    let app = router(state, &config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "ride pooling service listening");
    info!("health check: http://{addr}/health");

    axum::serve(listener, app).await?;
    Ok(())
}
