//! DevOps Demo API
//!
//! Usage:
//!   devops --port 3000
//!
//! Environment:
//!   PORT - Port to listen on (default: 3000)

use anyhow::{Context, Result};
use clap::Parser;
use secops_demo::{
    api::{devops_router, DevOpsState},
    config::load_env,
    init_tracing,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "devops")]
#[command(about = "DevOps demo API - routing, JSON parsing and a toy calculator")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let args = Args::parse();
    let app = devops_router(DevOpsState::default());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("🚀 Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
