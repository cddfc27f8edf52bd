//! DevSecOps service wiring: shared state and the layered router.

use crate::api::{public, secure};
use crate::auth::{api as auth_api, AuthGate, AuthState, JwtHandler, UserStore};
use crate::config::{Environment, Settings};
use crate::errors::panic_response;
use crate::middleware::{
    build_security_headers, redact_internal_errors, request_logging, run_pipeline,
    security_headers_middleware, GuardPipeline, RateLimiter, SecurityHeadersConfig,
};
use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, FromRef},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub rate_limiter: RateLimiter,
    pub environment: Environment,
    pub started_at: Instant,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Assemble state from an explicit credential store
    pub fn new(settings: &Settings, user_store: UserStore) -> Self {
        let jwt_handler = JwtHandler::new(&settings.jwt_secret, settings.token_ttl_secs);
        Self {
            auth: AuthState::new(Arc::new(user_store), Arc::new(jwt_handler)),
            rate_limiter: RateLimiter::new(settings.rate_limit.clone()),
            environment: settings.environment,
            started_at: Instant::now(),
        }
    }

    /// State seeded with the demo administrator, hashed at the configured cost
    pub fn with_default_users(settings: &Settings) -> Result<Self> {
        let user_store = UserStore::with_default_admin(settings.bcrypt_cost)
            .context("Failed to build credential store")?;
        Ok(Self::new(settings, user_store))
    }
}

/// Build the DevSecOps router.
///
/// Outermost to innermost: security headers, request logging, error
/// redaction, panic capture, rate limiting, then routing. Protected routes
/// additionally sit behind the auth gate.
pub fn devsecops_router(state: AppState, settings: &Settings) -> Router {
    let auth_guards =
        GuardPipeline::new().with(AuthGate::new(Arc::clone(&state.auth.jwt_handler)));
    let edge_guards = GuardPipeline::new().with(state.rate_limiter.clone());
    let security_headers = build_security_headers(&SecurityHeadersConfig::default());

    let protected_routes = Router::new()
        .route("/api/secure/profile", get(auth_api::get_profile))
        .route("/api/secure/data", post(secure::post_secure_data))
        .route_layer(middleware::from_fn_with_state(auth_guards, run_pipeline));

    let public_routes = Router::new()
        .route("/", get(public::welcome))
        .route("/health", get(public::health))
        .route("/api/security-info", get(public::security_info))
        .route("/api/login", post(auth_api::login));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(public::not_found)
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(security_headers))
                .layer(middleware::from_fn(security_headers_middleware))
                .layer(middleware::from_fn(request_logging))
                .layer(middleware::from_fn_with_state(
                    settings.environment,
                    redact_internal_errors,
                ))
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(middleware::from_fn_with_state(edge_guards, run_pipeline)),
        )
}
