//! Security headers middleware for HTTP responses.
//!
//! Applies a fixed set of hardening headers (CSP, HSTS, frame and sniffing
//! protection, cross-origin isolation) to every response.

use axum::{
    extract::Request,
    http::{
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_DNS_PREFETCH_CONTROL, X_FRAME_OPTIONS, X_XSS_PROTECTION,
        },
        HeaderMap, HeaderName, HeaderValue,
    },
    middleware::Next,
    response::Response,
    Extension,
};
use std::sync::Arc;

/// Header configuration.
#[derive(Debug, Clone)]
pub struct SecurityHeadersConfig {
    pub content_security_policy: String,
    pub frame_options: String,
    pub referrer_policy: String,
    pub hsts_max_age: u64,
    pub hsts_include_subdomains: bool,
    pub hsts_preload: bool,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            content_security_policy: [
                "default-src 'self'",
                "base-uri 'self'",
                "font-src 'self' https: data:",
                "form-action 'self'",
                "frame-ancestors 'self'",
                "img-src 'self' data:",
                "object-src 'none'",
                "script-src 'self'",
                "script-src-attr 'none'",
                "style-src 'self' 'unsafe-inline'",
                "upgrade-insecure-requests",
            ]
            .join(";"),
            frame_options: "SAMEORIGIN".to_string(),
            referrer_policy: "no-referrer".to_string(),
            hsts_max_age: 31_536_000,
            hsts_include_subdomains: true,
            hsts_preload: true,
        }
    }
}

/// Build security headers from configuration.
///
/// Values that are not valid header text are skipped.
#[must_use]
pub fn build_security_headers(config: &SecurityHeadersConfig) -> Arc<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off"));
    // Modern browsers should rely on CSP; the legacy auditor is disabled
    headers.insert(X_XSS_PROTECTION, HeaderValue::from_static("0"));
    headers.insert(
        HeaderName::from_static("x-download-options"),
        HeaderValue::from_static("noopen"),
    );
    headers.insert(
        HeaderName::from_static("x-permitted-cross-domain-policies"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("origin-agent-cluster"),
        HeaderValue::from_static("?1"),
    );

    if let Ok(value) = HeaderValue::from_str(&config.frame_options) {
        headers.insert(X_FRAME_OPTIONS, value);
    }

    if let Ok(value) = HeaderValue::from_str(&config.content_security_policy) {
        headers.insert(CONTENT_SECURITY_POLICY, value);
    }

    if let Ok(value) = HeaderValue::from_str(&config.referrer_policy) {
        headers.insert(REFERRER_POLICY, value);
    }

    let mut hsts = format!("max-age={}", config.hsts_max_age);
    if config.hsts_include_subdomains {
        hsts.push_str("; includeSubDomains");
    }
    if config.hsts_preload {
        hsts.push_str("; preload");
    }
    if let Ok(value) = HeaderValue::from_str(&hsts) {
        headers.insert(STRICT_TRANSPORT_SECURITY, value);
    }

    Arc::new(headers)
}

/// Middleware to add security headers to all responses.
///
/// Reads the pre-built `HeaderMap` from an `Extension`; add it as the
/// outermost layer so rejections and 404s carry the headers too.
pub async fn security_headers_middleware(
    Extension(headers): Extension<Arc<HeaderMap>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let response_headers = response.headers_mut();
    for (k, v) in headers.iter() {
        response_headers.insert(k.clone(), v.clone());
    }
    response_headers.remove("x-powered-by");
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_security_headers_default() {
        let headers = build_security_headers(&SecurityHeadersConfig::default());

        assert_eq!(headers.get(X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(headers.get(X_FRAME_OPTIONS).unwrap(), "SAMEORIGIN");
        assert_eq!(headers.get(REFERRER_POLICY).unwrap(), "no-referrer");
        assert_eq!(
            headers.get(STRICT_TRANSPORT_SECURITY).unwrap(),
            "max-age=31536000; includeSubDomains; preload"
        );

        let csp = headers.get(CONTENT_SECURITY_POLICY).unwrap().to_str().unwrap();
        assert!(csp.starts_with("default-src 'self'"));
        assert!(csp.contains("style-src 'self' 'unsafe-inline'"));
    }

    #[test]
    fn test_hsts_without_optional_directives() {
        let config = SecurityHeadersConfig {
            hsts_max_age: 600,
            hsts_include_subdomains: false,
            hsts_preload: false,
            ..SecurityHeadersConfig::default()
        };
        let headers = build_security_headers(&config);

        assert_eq!(headers.get(STRICT_TRANSPORT_SECURITY).unwrap(), "max-age=600");
    }

    #[test]
    fn test_invalid_values_skipped() {
        let config = SecurityHeadersConfig {
            frame_options: "bad\nvalue".to_string(),
            ..SecurityHeadersConfig::default()
        };
        let headers = build_security_headers(&config);

        assert!(headers.get(X_FRAME_OPTIONS).is_none());
        assert!(headers.contains_key(X_CONTENT_TYPE_OPTIONS));
    }
}
