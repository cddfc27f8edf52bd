//! Public endpoints, hardening layers and error handling of the DevSecOps router.

mod common;

use axum::http::{
    header::{
        CONTENT_SECURITY_POLICY, RETRY_AFTER, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS,
        X_FRAME_OPTIONS,
    },
    StatusCode,
};
use common::{store_with_broken_hash, test_settings, TestApp};
use secops_demo::{
    errors::GENERIC_INTERNAL_ERROR, middleware::RateLimitConfig, Environment, Settings,
};
use std::time::Duration;

// =============================================================================
// Static endpoints
// =============================================================================

#[tokio::test]
async fn test_welcome_reports_security_enabled() {
    let app = TestApp::new();

    let resp = app.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["security"], "enabled");
    assert!(resp.body["features"].as_array().unwrap().len() > 3);
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let app = TestApp::new();

    let resp = app.get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "OK");
    assert!(resp.body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_security_info() {
    let app = TestApp::new();

    let resp = app.get("/api/security-info").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["security_measures"]["helmet"], "enabled");
    assert_eq!(resp.body["security_measures"]["https_only"], false);
    assert_eq!(resp.body["compliance"]["owasp_top_10"], "covered");
}

#[tokio::test]
async fn test_security_info_https_only_in_production() {
    let app = TestApp::production();

    let resp = app.get("/api/security-info").await;

    assert_eq!(resp.body["security_measures"]["https_only"], true);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();

    let resp = app.get("/route-does-not-exist").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["error"], "Route not found");
}

// =============================================================================
// Security headers
// =============================================================================

#[tokio::test]
async fn test_security_headers_present() {
    let app = TestApp::new();

    for uri in ["/", "/health", "/missing", "/api/secure/profile"] {
        let resp = app.get(uri).await;
        assert_eq!(resp.headers.get(X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(resp.headers.get(X_FRAME_OPTIONS).unwrap(), "SAMEORIGIN");
        assert!(resp.headers.contains_key(CONTENT_SECURITY_POLICY));
        assert!(resp.headers.contains_key(STRICT_TRANSPORT_SECURITY));
        assert!(!resp.headers.contains_key("x-powered-by"));
    }
}

// =============================================================================
// Rate limiting
// =============================================================================

fn limited_settings(max_requests: u32) -> Settings {
    Settings {
        rate_limit: RateLimitConfig {
            max_requests,
            window: Duration::from_secs(60),
            ..RateLimitConfig::default()
        },
        ..test_settings()
    }
}

#[tokio::test]
async fn test_api_routes_rate_limited() {
    let app = TestApp::with_settings(limited_settings(3));

    for _ in 0..3 {
        let resp = app.get("/api/security-info").await;
        assert_eq!(resp.status, StatusCode::OK);
    }

    let resp = app.get("/api/security-info").await;
    assert_eq!(resp.status, StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers.contains_key(RETRY_AFTER));
    assert!(resp.body["error"].is_string());
    // Rejections still carry the hardening headers
    assert!(resp.headers.contains_key(X_CONTENT_TYPE_OPTIONS));
}

#[tokio::test]
async fn test_rate_limit_shared_across_api_routes() {
    let app = TestApp::with_settings(limited_settings(2));

    assert_eq!(app.get("/api/security-info").await.status, StatusCode::OK);
    assert_eq!(
        app.get("/api/secure/profile").await.status,
        StatusCode::UNAUTHORIZED
    );

    let resp = app.login("admin", "Admin123!").await;
    assert_eq!(resp.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(app.lookup_count(), 0);
}

#[tokio::test]
async fn test_non_api_routes_not_rate_limited() {
    let app = TestApp::with_settings(limited_settings(1));

    for _ in 0..5 {
        assert_eq!(app.get("/health").await.status, StatusCode::OK);
        assert_eq!(app.get("/").await.status, StatusCode::OK);
    }
}

// =============================================================================
// Internal errors
// =============================================================================

#[tokio::test]
async fn test_internal_error_detail_visible_in_development() {
    let app = TestApp::with_store(test_settings(), store_with_broken_hash());

    let resp = app.login("broken", "password123").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = resp.body["error"].as_str().unwrap();
    assert_ne!(detail, GENERIC_INTERNAL_ERROR);
    assert!(!detail.is_empty());
}

#[tokio::test]
async fn test_internal_error_detail_redacted_in_production() {
    let settings = Settings {
        environment: Environment::Production,
        ..test_settings()
    };
    let app = TestApp::with_store(settings, store_with_broken_hash());

    let resp = app.login("broken", "password123").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body["error"], GENERIC_INTERNAL_ERROR);
}

#[tokio::test]
async fn test_other_accounts_unaffected_by_broken_record() {
    let app = TestApp::with_store(test_settings(), store_with_broken_hash());

    let resp = app.login("admin", "Admin123!").await;

    assert_eq!(resp.status, StatusCode::OK);
}
