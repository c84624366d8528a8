//! Authentication API integration tests
//!
//! Tests for login, the current-user endpoint and token handling.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, assert_status, login, TestApp, ADMIN, USER};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.get("/api/health", None).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let response = app
        .post("/api/auth/login", None, json!({ "username": "user2", "password": "user2" }))
        .await;

    let body = assert_status(&response, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["username"], "user2");
    assert_eq!(body["role"], "admin");
    assert!(body["userId"].is_string());
}

#[tokio::test]
async fn test_login_rejections() {
    let app = TestApp::new().await;

    let response = app.post("/api/auth/login", None, json!({ "username": "user1" })).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Username and password required");

    let response = app
        .post("/api/auth/login", None, json!({ "username": "user1", "password": "nope" }))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Invalid credentials");

    let response = app
        .post("/api/auth/login", None, json!({ "username": "ghost", "password": "user1" }))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Invalid credentials");
}

#[tokio::test]
async fn test_me_returns_principal() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;

    let response = app.get("/api/auth/me", Some(&token)).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["username"], "user1");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_protected_routes_need_a_valid_token() {
    let app = TestApp::new().await;

    let response = app.get("/api/contacts", None).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Access token required");

    let response = app.get("/api/contacts", Some("not.a.token")).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Invalid or expired token");
}

#[tokio::test]
async fn test_deleted_user_token_is_rejected() {
    let app = TestApp::new().await;
    let admin = login(&app, ADMIN).await;
    let token = crate::common::create_and_login(&app, &admin, "temp", "user").await;

    let me = app.get("/api/auth/me", Some(&token)).await;
    let id = me.body["userId"].as_str().unwrap().to_string();
    assert_status(&app.delete(&format!("/api/users/{id}"), Some(&admin)).await, StatusCode::OK);

    let response = app.get("/api/auth/me", Some(&token)).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Invalid or expired token");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;
    let response = app.get("/api/nothing-here", None).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Route not found");
}
