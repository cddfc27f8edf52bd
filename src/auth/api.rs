//! Authentication API Endpoints
//! Mission: Provide login and the authenticated profile endpoint

use crate::auth::{
    jwt::JwtHandler,
    models::{AuthenticatedUser, LoginRequest, LoginResponse, ProfileResponse},
    user_store::UserStore,
};
use crate::errors::ApiError;
use crate::validation::{validate_login, LoginInput};
use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Login endpoint - POST /api/login
///
/// Input is validated before the credential store is touched. Unknown
/// usernames and wrong passwords produce the same response.
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) = payload?;
    let LoginInput { username, password } = validate_login(&payload.username, &payload.password)?;

    info!("🔐 Login attempt: {}", username);

    // bcrypt is deliberately slow; keep it off the async workers
    let store = Arc::clone(&state.user_store);
    let attempted = username.clone();
    let user = tokio::task::spawn_blocking(move || store.authenticate(&attempted, &password))
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)?;

    let Some(user) = user else {
        warn!("❌ Failed login attempt: {}", username);
        return Err(ApiError::InvalidCredentials);
    };

    let (token, expires_in) = state
        .jwt_handler
        .generate_token(&user)
        .map_err(ApiError::internal)?;

    info!(
        "✅ Login successful: {} ({})",
        user.username,
        user.role.as_str()
    );

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        expires_in,
    }))
}

/// Current user endpoint - GET /api/secure/profile
pub async fn get_profile(Extension(user): Extension<AuthenticatedUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Profile data (protected route)",
        user,
    })
}
