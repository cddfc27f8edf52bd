//! Public informational endpoints of the DevSecOps service

use crate::app::AppState;
use crate::errors::ApiError;
use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

/// GET /
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "🔒 Welcome to the DevSecOps Demo",
        "version": env!("CARGO_PKG_VERSION"),
        "security": "enabled",
        "features": [
            "Security Headers (CSP, HSTS, frame protection)",
            "Rate Limiting (abuse protection)",
            "Input Validation (XSS/Injection Prevention)",
            "JWT Authentication",
            "Password Hashing (bcrypt)",
            "Error Detail Redaction",
            "Dependency Scanning"
        ]
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "timestamp": Utc::now().to_rfc3339(),
        "security": "enabled"
    }))
}

/// GET /api/security-info
pub async fn security_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "security_measures": {
            "helmet": "enabled",
            "rate_limiting": "enabled",
            "input_validation": "enabled",
            "authentication": "JWT",
            "password_hashing": "bcrypt",
            "https_only": state.environment.is_production(),
            "cors": "configured",
            "csp": "enabled"
        },
        "compliance": {
            "owasp_top_10": "covered",
            "pci_dss": "partial",
            "gdpr": "basic"
        }
    }))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
