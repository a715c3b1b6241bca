//! Web API Authentication Tests
//!
//! Integration tests for registration, login and the token gate.

mod common;

use axum::http::StatusCode;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};
use std::time::Duration;

use common::{
    authenticated_user, bearer, create_test_server, create_test_server_with, login_token,
    register_user, AUTH, TEST_SECRET,
};
use storefront::TokenService;

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_success() {
    let server = create_test_server().await;

    let body = register_user(&server, "a@b.com", "secret1").await;

    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["firstName"], "Test");
    assert_eq!(body["lastName"], "User");
    assert_eq!(body["email"], "a@b.com");
    assert!(body["createdAt"].is_string());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = create_test_server().await;
    register_user(&server, "a@b.com", "secret1").await;

    let response = server
        .post("/api/v1/register")
        .json(&json!({
            "firstName": "Other",
            "lastName": "User",
            "email": "a@b.com",
            "password": "secret2"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_register_validation_error() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/register")
        .json(&json!({
            "firstName": "",
            "lastName": "User",
            "email": "not-an-email",
            "password": "123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("email"));
    assert!(message.contains("password"));
}

#[tokio::test]
async fn test_register_missing_fields() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/register")
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = create_test_server().await;
    register_user(&server, "a@b.com", "secret1").await;

    let token = login_token(&server, "a@b.com", "secret1").await;

    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);

    let header = URL_SAFE_NO_PAD.decode(token.split('.').next().unwrap()).unwrap();
    let header: Value = serde_json::from_slice(&header).unwrap();
    assert_eq!(header["alg"], "HS256");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = create_test_server().await;
    register_user(&server, "a@b.com", "secret1").await;

    let wrong_password = server
        .post("/api/v1/login")
        .json(&json!({ "email": "a@b.com", "password": "wrong" }))
        .await;
    let unknown_email = server
        .post("/api/v1/login")
        .json(&json!({ "email": "nobody@b.com", "password": "secret1" }))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.text(),
        r#"{"error":"invalid email or password"}"#
    );
    assert_eq!(wrong_password.text(), unknown_email.text());
}

#[tokio::test]
async fn test_login_without_secret_is_server_error() {
    let server = create_test_server_with(TokenService::new(Vec::new(), 3600)).await;
    register_user(&server, "a@b.com", "secret1").await;

    let response = server
        .post("/api/v1/login")
        .json(&json!({ "email": "a@b.com", "password": "secret1" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("secret1"));
}

#[tokio::test]
async fn test_login_invalid_json() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/login")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/login")
        .json(&json!({ "email": "not-an-email", "password": "secret1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text(),
        r#"{"error":"email: must be a valid email address"}"#
    );
}

// ============================================================================
// Protected endpoints
// ============================================================================

#[tokio::test]
async fn test_me_with_token() {
    let server = create_test_server().await;
    let token = authenticated_user(&server, "a@b.com").await;

    let response = server
        .get("/api/v1/users/me")
        .add_header(AUTH, bearer(&token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["email"], "a@b.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_me_without_header() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/users/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), r#"{"error":"missing authorization header"}"#);
}

#[tokio::test]
async fn test_me_with_wrong_scheme() {
    let server = create_test_server().await;
    let token = authenticated_user(&server, "a@b.com").await;

    let response = server
        .get("/api/v1/users/me")
        .add_header(AUTH, format!("Token {}", token))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), r#"{"error":"invalid authorization header"}"#);
}

#[tokio::test]
async fn test_me_with_invalid_token() {
    let server = create_test_server().await;

    let response = server
        .get("/api/v1/users/me")
        .add_header(AUTH, "Bearer invalid-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), r#"{"error":"invalid or expired token"}"#);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let server = create_test_server().await;
    authenticated_user(&server, "a@b.com").await;

    let forged = TokenService::new("some-other-secret", 3600).issue(1).unwrap();
    let response = server
        .get("/api/v1/users/me")
        .add_header(AUTH, bearer(&forged))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unsigned_token_rejected() {
    let server = create_test_server().await;
    authenticated_user(&server, "a@b.com").await;

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let now = chrono::Utc::now().timestamp();
    let claims = URL_SAFE_NO_PAD.encode(
        json!({ "sub": "1", "iat": now, "exp": now + 3600 })
            .to_string()
            .as_bytes(),
    );
    let token = format!("{}.{}.", header, claims);

    let response = server
        .get("/api/v1/users/me")
        .add_header(AUTH, bearer(&token))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), r#"{"error":"invalid or expired token"}"#);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let server = create_test_server_with(TokenService::new(TEST_SECRET, 0)).await;
    let token = authenticated_user(&server, "a@b.com").await;

    tokio::time::sleep(Duration::from_secs(1)).await;

    let response = server
        .get("/api/v1/users/me")
        .add_header(AUTH, bearer(&token))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), r#"{"error":"invalid or expired token"}"#);
}

#[tokio::test]
async fn test_token_for_deleted_or_unknown_user() {
    let server = create_test_server().await;
    let token = TokenService::new(TEST_SECRET, 3600).issue(999).unwrap();

    let response = server
        .get("/api/v1/users/me")
        .add_header(AUTH, bearer(&token))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[tokio::test]
async fn test_full_auth_flow() {
    let server = create_test_server().await;

    // Register, then again with the same email
    register_user(&server, "a@b.com", "secret1").await;
    let dup = server
        .post("/api/v1/register")
        .json(&json!({
            "firstName": "Test",
            "lastName": "User",
            "email": "a@b.com",
            "password": "secret1"
        }))
        .await;
    dup.assert_status(StatusCode::BAD_REQUEST);
    assert!(dup.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    // Both login failures look the same
    let wrong = server
        .post("/api/v1/login")
        .json(&json!({ "email": "a@b.com", "password": "wrong" }))
        .await;
    let unknown = server
        .post("/api/v1/login")
        .json(&json!({ "email": "nobody@b.com", "password": "secret1" }))
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.text(), unknown.text());

    // Correct login opens the protected routes
    let token = login_token(&server, "a@b.com", "secret1").await;
    server
        .get("/api/v1/products")
        .add_header(AUTH, bearer(&token))
        .await
        .assert_status_ok();

    server
        .get("/api/v1/products")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
