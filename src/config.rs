//! Runtime configuration.
//!
//! Values come from command-line flags, falling back to environment variables
//! (a `.env` file is loaded first) and then to built-in defaults. Parsed
//! arguments are resolved once into an immutable [`Settings`].

use crate::auth::{jwt::DEFAULT_TOKEN_TTL_SECS, password::DEFAULT_COST};
use crate::middleware::rate_limit::RateLimitConfig;
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Signing secret used when none is configured. Development mode only.
pub const DEFAULT_JWT_SECRET: &str = "secret-key-change-in-production";

/// JSON body size cap (10 KiB)
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Verbose errors, insecure defaults allowed
    Development,
    /// Error details hidden, every secret must be configured
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "devsecops")]
#[command(about = "DevSecOps demo API - JWT login behind hardened middleware")]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// HMAC secret used to sign and verify tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Deployment mode
    #[arg(long, env = "APP_ENV", value_enum, default_value = "development")]
    pub environment: Environment,

    /// Lifetime of issued tokens in seconds
    #[arg(long, env = "TOKEN_TTL_SECS", default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    pub token_ttl_secs: u64,

    /// bcrypt work factor for the seeded credentials
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_COST)]
    pub bcrypt_cost: u32,

    /// Requests allowed per client within one window on /api/ routes
    #[arg(long, env = "RATE_LIMIT_MAX", default_value = "100")]
    pub rate_limit_max: u32,

    /// Rate limit window length in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value = "900")]
    pub rate_limit_window_secs: u64,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "BODY_LIMIT_BYTES", default_value_t = DEFAULT_BODY_LIMIT_BYTES)]
    pub body_limit_bytes: usize,
}

/// Resolved, immutable configuration shared by the service
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub jwt_secret: String,
    pub environment: Environment,
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub rate_limit: RateLimitConfig,
    pub body_limit_bytes: usize,
}

impl Settings {
    /// Development settings with an explicit secret and default limits
    pub fn development(jwt_secret: impl Into<String>) -> Self {
        Self {
            port: 3000,
            jwt_secret: jwt_secret.into(),
            environment: Environment::Development,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: DEFAULT_COST,
            rate_limit: RateLimitConfig::default(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl ServerArgs {
    /// Validate the arguments and settle the signing secret
    pub fn into_settings(self) -> Result<Settings> {
        let jwt_secret = match self.jwt_secret.filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None if self.environment.is_production() => {
                bail!("JWT_SECRET must be set when running in production")
            }
            None => {
                warn!("⚠️  JWT_SECRET not set - using the insecure development default");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        if self.token_ttl_secs == 0 {
            bail!("TOKEN_TTL_SECS must be greater than zero");
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {}", self.bcrypt_cost);
        }
        if self.rate_limit_max == 0 || self.rate_limit_window_secs == 0 {
            bail!("RATE_LIMIT_MAX and RATE_LIMIT_WINDOW_SECS must be greater than zero");
        }

        Ok(Settings {
            port: self.port,
            jwt_secret,
            environment: self.environment,
            token_ttl_secs: self.token_ttl_secs,
            bcrypt_cost: self.bcrypt_cost,
            rate_limit: RateLimitConfig {
                max_requests: self.rate_limit_max,
                window: Duration::from_secs(self.rate_limit_window_secs),
                ..RateLimitConfig::default()
            },
            body_limit_bytes: self.body_limit_bytes,
        })
    }
}

/// Load `.env` from the working directory (and parents), then from the crate root
pub fn load_env() {
    let _ = dotenv::dotenv();

    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
