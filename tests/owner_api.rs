//! HTTP tests for the owner login endpoint.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::TestContext;

/// Low-cost hash so the tests stay fast; production uses a higher cost.
fn test_hash(password: &str) -> String {
    bcrypt::hash(password, 4).unwrap()
}

#[tokio::test]
async fn test_login_success() {
    let ctx = TestContext::with_owner_hash(Some(test_hash("satya")));

    let response = ctx
        .server
        .post("/api/owner/login")
        .json(&json!({ "password": "satya" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Login successful");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let ctx = TestContext::with_owner_hash(Some(test_hash("satya")));

    let response = ctx
        .server
        .post("/api/owner/login")
        .json(&json!({ "password": "guess" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid password");
}

#[tokio::test]
async fn test_login_without_configured_hash_fails_closed() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/owner/login")
        .json(&json!({ "password": "anything" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid password");
}

#[tokio::test]
async fn test_login_missing_password_field_is_400() {
    let ctx = TestContext::with_owner_hash(Some(test_hash("satya")));

    let response = ctx.server.post("/api/owner/login").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_unknown_field_is_400() {
    let ctx = TestContext::with_owner_hash(Some(test_hash("satya")));

    let response = ctx
        .server
        .post("/api/owner/login")
        .json(&json!({ "password": "satya", "admin": true }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hash_verify_round_trip() {
    let hash = test_hash("satya");

    assert!(hash.starts_with("$2"));
    assert!(bcrypt::verify("satya", &hash).unwrap());
    assert!(!bcrypt::verify("wrong", &hash).unwrap());
}
