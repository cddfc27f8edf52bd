//! Rate limiting guard.
//!
//! Simple in-memory rate limiting per client IP using a fixed window. Only
//! paths under the configured prefix are counted.

use crate::middleware::pipeline::{Flow, Guard};
use axum::{
    extract::{ConnectInfo, Request},
    http::{header::RETRY_AFTER, StatusCode},
    response::IntoResponse,
    Json,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Body text for rejected requests.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Configuration for rate limiting.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
    /// Only request paths starting with this prefix are limited.
    pub path_prefix: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
            path_prefix: "/api/".to_string(),
        }
    }
}

/// Rate limiter state tracking requests per IP.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    state: Arc<Mutex<HashMap<IpAddr, RateLimitEntry>>>,
}

struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RateLimitResult {
    Allowed { remaining: u32 },
    Exceeded { retry_after: Duration },
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count one request from `ip` and decide whether it may proceed.
    pub fn record(&self, ip: IpAddr) -> RateLimitResult {
        self.record_at(ip, Instant::now())
    }

    fn record_at(&self, ip: IpAddr, now: Instant) -> RateLimitResult {
        let mut state = self.state.lock();

        let entry = state.entry(ip).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) >= self.config.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count = entry.count.saturating_add(1);

        if entry.count > self.config.max_requests {
            let reset_at = entry.window_start + self.config.window;
            RateLimitResult::Exceeded {
                retry_after: reset_at.saturating_duration_since(now),
            }
        } else {
            RateLimitResult::Allowed {
                remaining: self.config.max_requests - entry.count,
            }
        }
    }

    /// Periodic cleanup of expired entries (call from a background task).
    pub fn cleanup(&self) {
        let mut state = self.state.lock();
        let now = Instant::now();
        let window = self.config.window;

        state.retain(|_, entry| now.duration_since(entry.window_start) < window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.state.lock().len()
    }

    pub fn window(&self) -> Duration {
        self.config.window
    }
}

/// Peer address of the request; clients without one share a single bucket.
fn client_ip(req: &Request) -> IpAddr {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

impl Guard for RateLimiter {
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    fn check(&self, req: &mut Request) -> Flow {
        if !req.uri().path().starts_with(&self.config.path_prefix) {
            return Flow::Continue;
        }

        let ip = client_ip(req);

        match self.record(ip) {
            RateLimitResult::Allowed { .. } => Flow::Continue,
            RateLimitResult::Exceeded { retry_after } => {
                // Round up so clients never retry a moment too early
                let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                warn!(
                    ip = %ip,
                    retry_after_secs = retry_secs,
                    "Rate limit exceeded"
                );

                Flow::Reject(
                    (
                        StatusCode::TOO_MANY_REQUESTS,
                        [(RETRY_AFTER, retry_secs.to_string())],
                        Json(serde_json::json!({ "error": RATE_LIMIT_MESSAGE })),
                    )
                        .into_response(),
                )
            }
        }
    }
}
