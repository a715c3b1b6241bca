//! Shared helpers for the Web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use serde_json::{json, Value};

use storefront::web::router::{create_router, DEFAULT_REQUEST_TIMEOUT};
use storefront::web::AppState;
use storefront::{CredentialHasher, Database, HashCost, TokenService};

/// Signing secret used by every test server.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Cheap Argon2 cost so the suite stays fast.
pub fn fast_hasher() -> CredentialHasher {
    CredentialHasher::new(HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("valid test hash cost")
}

/// Create a test server with an in-memory database and the given token service.
pub async fn create_test_server_with(tokens: TokenService) -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = AppState::new(
        Arc::new(storefront::UserRepository::new(db.pool().clone())),
        Arc::new(storefront::ProductRepository::new(db.pool().clone())),
        fast_hasher(),
        tokens,
    );

    let router = create_router(Arc::new(app_state), DEFAULT_REQUEST_TIMEOUT);
    TestServer::new(router).expect("Failed to create test server")
}

/// Create a test server with a one-hour token lifetime.
pub async fn create_test_server() -> TestServer {
    create_test_server_with(TokenService::new(TEST_SECRET, 3600)).await
}

/// Register a user and return the response body.
pub async fn register_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/api/v1/register")
        .json(&json!({
            "firstName": "Test",
            "lastName": "User",
            "email": email,
            "password": password
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log in and return the token.
pub async fn login_token(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/v1/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

/// Register and log in a fresh user, returning the token.
pub async fn authenticated_user(server: &TestServer, email: &str) -> String {
    register_user(server, email, "secret1").await;
    login_token(server, email, "secret1").await
}

/// `Authorization` header name re-exported for test files.
pub const AUTH: axum::http::HeaderName = AUTHORIZATION;

/// Bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
