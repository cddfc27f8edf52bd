//! DevOps / DevSecOps demo services
//!
//! Exposes the routers and their building blocks for use by the binaries
//! and integration tests.

pub mod api;
pub mod app;
pub mod auth;
pub mod calculator;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod validation;

pub use app::{devsecops_router, AppState};
pub use config::{Environment, ServerArgs, Settings};

/// Initialize tracing with an env-overridable default filter
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "secops_demo=debug,devsecops=debug,devops=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
