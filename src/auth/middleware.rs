//! Authentication Middleware
//! Mission: Gate protected routes behind bearer JWT validation

use crate::auth::{
    jwt::{JwtHandler, TokenError},
    models::{AuthenticatedUser, Claims},
};
use crate::middleware::pipeline::{Flow, Guard};
use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Guard that verifies the bearer token and attaches the caller's identity
pub struct AuthGate {
    jwt_handler: Arc<JwtHandler>,
}

impl AuthGate {
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self { jwt_handler }
    }

    /// Verify the request's credentials and, on success, store claims in its extensions
    pub fn authorize(&self, req: &mut Request) -> Result<(), AuthError> {
        let token = extract_bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;

        let claims = self.jwt_handler.validate_token(token).map_err(|e| match e {
            TokenError::Missing => AuthError::MissingToken,
            TokenError::Invalid | TokenError::Signing(_) => AuthError::InvalidToken,
        })?;

        // Add identity to request extensions so handlers can access it
        req.extensions_mut().insert(AuthenticatedUser::from(&claims));
        req.extensions_mut().insert(claims);
        Ok(())
    }
}

impl Guard for AuthGate {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn check(&self, req: &mut Request) -> Flow {
        match self.authorize(req) {
            Ok(()) => Flow::Continue,
            Err(e) => {
                warn!(path = %req.uri().path(), reason = ?e, "🔒 Unauthorized request blocked");
                Flow::Reject(e.into_response())
            }
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extract claims from request (use after the auth gate)
pub fn extract_claims(req: &Request) -> Option<&Claims> {
    req.extensions().get::<Claims>()
}

/// Auth error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Token not provided"),
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid or expired token"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
