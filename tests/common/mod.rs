//! Shared helpers for router-level tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use secops_demo::{
    auth::{
        models::{User, UserRole},
        password::hash_password,
        UserStore,
    },
    devsecops_router, AppState, Environment, Settings,
};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-12345";
pub const TEST_COST: u32 = 4;

/// Development settings with a fixture secret and the cheapest bcrypt cost
pub fn test_settings() -> Settings {
    Settings {
        bcrypt_cost: TEST_COST,
        ..Settings::development(TEST_SECRET)
    }
}

/// Router plus the state it was built from
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let store = UserStore::with_default_admin(settings.bcrypt_cost).expect("store");
        Self::with_store(settings, store)
    }

    pub fn with_store(settings: Settings, store: UserStore) -> Self {
        let state = AppState::new(&settings, store);
        let router = devsecops_router(state.clone(), &settings);
        Self { router, state }
    }

    pub fn production() -> Self {
        Self::with_settings(Settings {
            environment: Environment::Production,
            ..test_settings()
        })
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(get(uri, None)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.send(post_json(
            "/api/login",
            &serde_json::json!({ "username": username, "password": password }),
            None,
        ))
        .await
    }

    /// Log in as the seeded admin and return the issued token
    pub async fn admin_token(&self) -> String {
        let resp = self.login("admin", "Admin123!").await;
        assert_eq!(resp.status, StatusCode::OK);
        resp.body["token"].as_str().expect("token").to_string()
    }

    pub fn lookup_count(&self) -> u64 {
        self.state.auth.user_store.lookup_count()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    post_raw(uri, body.to_string(), token)
}

pub fn post_raw(uri: &str, body: impl Into<Body>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.into()).expect("request")
}

/// Store holding one account whose stored hash cannot be parsed
pub fn store_with_broken_hash() -> UserStore {
    let admin = User {
        id: 1,
        username: "admin".to_string(),
        password_hash: hash_password("Admin123!", TEST_COST).expect("hash"),
        role: UserRole::Admin,
    };
    let broken = User {
        id: 2,
        username: "broken".to_string(),
        password_hash: "not-a-bcrypt-hash".to_string(),
        role: UserRole::User,
    };
    UserStore::new(vec![admin, broken], TEST_COST).expect("store")
}
