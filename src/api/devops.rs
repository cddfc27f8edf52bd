//! DevOps demo service: welcome, health, a fixed user list and the calculator.
//!
//! This service has no authentication and no hardening middleware.

use crate::api::public::not_found;
use crate::calculator::{calculate, Operation};
use crate::middleware::request_logging;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};
use std::time::Instant;

#[derive(Clone)]
pub struct DevOpsState {
    pub started_at: Instant,
}

impl Default for DevOpsState {
    fn default() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub id: u32,
    pub name: &'static str,
    pub role: &'static str,
}

/// Fixed roster served by `/api/users`
pub static TEAM: [TeamMember; 3] = [
    TeamMember {
        id: 1,
        name: "Juan",
        role: "DevOps Engineer",
    },
    TeamMember {
        id: 2,
        name: "María",
        role: "Developer",
    },
    TeamMember {
        id: 3,
        name: "Carlos",
        role: "QA Engineer",
    },
];

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub operation: String,
    pub a: Number,
    pub b: Number,
}

/// GET /
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the DevOps Demo!",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// GET /health
pub async fn health(State(state): State<DevOpsState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "uptime": state.started_at.elapsed().as_secs_f64()
    }))
}

/// GET /api/users
pub async fn list_users() -> Json<&'static [TeamMember]> {
    Json(TEAM.as_slice())
}

/// POST /api/calculate
pub async fn post_calculate(Json(req): Json<CalculateRequest>) -> Response {
    let Some(op) = Operation::parse(&req.operation) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid operation" })),
        )
            .into_response();
    };

    let result = calculate(op, &req.a, &req.b);

    Json(json!({
        "operation": req.operation,
        "a": req.a,
        "b": req.b,
        "result": result
    }))
    .into_response()
}

/// Router for the DevOps demo binary
pub fn devops_router(state: DevOpsState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/api/users", get(list_users))
        .route("/api/calculate", post(post_calculate))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(request_logging))
}
