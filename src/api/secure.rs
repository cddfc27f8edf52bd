//! Protected data endpoint

use crate::auth::models::AuthenticatedUser;
use crate::errors::ApiError;
use crate::validation::validate_data;
use axum::{extract::rejection::JsonRejection, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct SecureDataRequest {
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct SecureDataResponse {
    pub message: &'static str,
    pub received: String,
    pub user: String,
}

/// POST /api/secure/data
///
/// Runs behind the auth gate, so validation only happens for authenticated callers.
pub async fn post_secure_data(
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<SecureDataRequest>, JsonRejection>,
) -> Result<Json<SecureDataResponse>, ApiError> {
    let Json(payload) = payload?;
    let received = validate_data(&payload.data)?;

    debug!(user = %user.username, len = received.len(), "Secure data accepted");

    Ok(Json(SecureDataResponse {
        message: "Data processed securely",
        received,
        user: user.username,
    }))
}
