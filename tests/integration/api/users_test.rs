//! User administration API integration tests
//!
//! Admin-only routes and the guards around role changes and deletion.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, assert_status, create_and_login, login, TestApp, ADMIN, USER};

async fn user_id(app: &TestApp, token: &str) -> String {
    let response = app.get("/api/auth/me", Some(token)).await;
    response.body["userId"].as_str().expect("user id").to_string()
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;

    let response = app.get("/api/users", Some(&token)).await;
    assert_error(&response, StatusCode::FORBIDDEN, "Admin access required");

    let response = app.get("/api/users", None).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Access token required");
}

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::new().await;
    let admin = login(&app, ADMIN).await;

    let response = app.get("/api/users?limit=1", Some(&admin)).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
    assert!(body["users"][0].get("passwordHash").is_none());
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 1,
            "totalPages": 2,
            "totalUsers": 2,
            "hasNext": true,
            "hasPrev": false
        })
    );
}

#[tokio::test]
async fn test_create_user() {
    let app = TestApp::new().await;
    let admin = login(&app, ADMIN).await;

    let response = app
        .post("/api/users", Some(&admin), json!({ "username": "carol", "password": "secret1" }))
        .await;
    let body = assert_status(&response, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["username"], "carol");
    assert_eq!(body["user"]["role"], "user");

    let response = app
        .post("/api/users", Some(&admin), json!({ "username": "carol", "password": "secret1" }))
        .await;
    assert_error(&response, StatusCode::CONFLICT, "Username already exists");

    let response = app
        .post("/api/users", Some(&admin), json!({ "username": "dan", "password": "123" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Password must be at least 6 characters long");

    let response = app
        .post(
            "/api/users",
            Some(&admin),
            json!({ "username": "dan", "password": "secret1", "role": "owner" }),
        )
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Valid role (user or admin) is required");
}

#[tokio::test]
async fn test_update_role() {
    let app = TestApp::new().await;
    let admin = login(&app, ADMIN).await;
    let carol = create_and_login(&app, &admin, "carol", "user").await;
    let carol_id = user_id(&app, &carol).await;
    let admin_id = user_id(&app, &admin).await;

    let response = app
        .put(&format!("/api/users/{admin_id}/role"), Some(&admin), json!({ "role": "user" }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, "Cannot change your own role");

    let response = app
        .put(&format!("/api/users/{}/role", uuid::Uuid::new_v4()), Some(&admin), json!({ "role": "user" }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "User not found");

    let response = app
        .put(&format!("/api/users/{carol_id}/role"), Some(&admin), json!({}))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Valid role (user or admin) is required");

    let response = app
        .put(&format!("/api/users/{carol_id}/role"), Some(&admin), json!({ "role": "admin" }))
        .await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["message"], "User role updated successfully");
    assert_eq!(body["user"]["role"], "admin");

    // The promotion applies to carol's existing token
    assert_status(&app.get("/api/users", Some(&carol)).await, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_user_guards() {
    let app = TestApp::new().await;
    let admin = login(&app, ADMIN).await;
    let admin_id = user_id(&app, &admin).await;

    let response = app.delete(&format!("/api/users/{admin_id}"), Some(&admin)).await;
    assert_error(&response, StatusCode::FORBIDDEN, "Cannot delete your own account");

    let other_admin = create_and_login(&app, &admin, "eve", "admin").await;
    let other_admin_id = user_id(&app, &other_admin).await;
    let response = app.delete(&format!("/api/users/{other_admin_id}"), Some(&admin)).await;
    assert_error(&response, StatusCode::FORBIDDEN, "Cannot delete an admin user");

    let user = login(&app, USER).await;
    let user1_id = user_id(&app, &user).await;
    let response = app
        .post(
            "/api/contacts",
            Some(&user),
            json!({ "name": "Al Pine", "phone": "555-0100", "address": "1 Rd" }),
        )
        .await;
    let contact_id = assert_status(&response, StatusCode::CREATED)["id"].as_str().unwrap().to_string();

    let response = app.delete(&format!("/api/users/{user1_id}"), Some(&admin)).await;
    assert_error(&response, StatusCode::FORBIDDEN, "User has contacts and cannot be deleted");

    assert_status(&app.delete(&format!("/api/contacts/{contact_id}"), Some(&user)).await, StatusCode::OK);
    let response = app.delete(&format!("/api/users/{user1_id}"), Some(&admin)).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let response = app.delete(&format!("/api/users/{user1_id}"), Some(&admin)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "User not found");
}
