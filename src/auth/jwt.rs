//! JWT Token Handler
//! Mission: Issue and validate HS256 tokens bound to a shared secret

use crate::auth::models::{Claims, User};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use tracing::debug;

/// Token lifetime used by the demo service
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Reasons a token is refused
///
/// Expired tokens deliberately fold into `Invalid`.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("no token supplied")]
    Missing,
    #[error("token is invalid or expired")]
    Invalid,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT Handler for token operations
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key and token lifetime
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Generate a JWT token for a user, returning it with its lifetime in seconds
    pub fn generate_token(&self, user: &User) -> Result<(String, u64), TokenError> {
        self.generate_token_at(user, Utc::now().timestamp())
    }

    /// Generate a token as if issued at `now` (unix seconds)
    pub fn generate_token_at(&self, user: &User, now: i64) -> Result<(String, u64), TokenError> {
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now,
            exp: now.saturating_add(ttl),
        };

        debug!(
            "Generating JWT for user {} ({}), expires in {}s",
            user.username, user.id, self.ttl_secs
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)?;

        Ok((token, self.ttl_secs))
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_token_at(token, Utc::now().timestamp())
    }

    /// Validate a token against an explicit clock (unix seconds)
    ///
    /// A token stays valid through its `exp` second and is refused after it.
    pub fn validate_token_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        // Expiry is checked below against the supplied clock, without leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let decoded = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("Rejected JWT: {}", e);
            TokenError::Invalid
        })?;

        if now > decoded.claims.exp {
            debug!("Rejected expired JWT for user {}", decoded.claims.username);
            return Err(TokenError::Invalid);
        }

        debug!("Validated JWT for user {}", decoded.claims.username);

        Ok(decoded.claims)
    }
}
