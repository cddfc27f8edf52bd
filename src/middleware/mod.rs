//! Middleware for observability and request hardening.
//!
//! This module provides:
//! - An ordered guard pipeline (auth gate, rate limiting)
//! - Request logging with latency tracking
//! - Security response headers
//! - Redaction of internal error details in production

pub mod logging;
pub mod pipeline;
pub mod rate_limit;
pub mod redaction;
pub mod security_headers;

pub use logging::request_logging;
pub use pipeline::{run_pipeline, Flow, Guard, GuardPipeline};
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use redaction::redact_internal_errors;
pub use security_headers::{build_security_headers, security_headers_middleware, SecurityHeadersConfig};
