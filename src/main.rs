//! DevSecOps Demo API
//! Mission: Showcase JWT login, bcrypt password checks and hardened middleware

use anyhow::{Context, Result};
use clap::Parser;
use secops_demo::{config::load_env, devsecops_router, init_tracing, AppState, ServerArgs};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::time::interval;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let settings = ServerArgs::parse().into_settings()?;

    info!("🔒 DevSecOps demo starting ({:?} mode)", settings.environment);

    let state = AppState::with_default_users(&settings)?;

    // Prune idle rate limit windows so the client table stays bounded
    let limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut ticker = interval(limiter.window());
        loop {
            ticker.tick().await;
            limiter.cleanup();
        }
    });

    let app = devsecops_router(state, &settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("🎯 Secure server listening on http://{}", addr);
    info!("🛡️  Security measures active");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
