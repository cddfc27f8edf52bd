//! Hides internal error details from clients in production.

use crate::config::Environment;
use crate::errors::GENERIC_INTERNAL_ERROR;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Replace the body of every 500 response with a generic message when
/// running in production. Other modes pass responses through untouched.
pub async fn redact_internal_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if environment.is_production() && response.status() == StatusCode::INTERNAL_SERVER_ERROR {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": GENERIC_INTERNAL_ERROR })),
        )
            .into_response();
    }

    response
}
