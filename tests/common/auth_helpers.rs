//! Authentication test helpers
//!
//! Log in through the real endpoint so tokens are issued exactly as clients
//! receive them.

use serde_json::json;

use crate::common::app::TestApp;

/// The seeded account with role `user`
pub const USER: (&str, &str) = ("user1", "user1");

/// The seeded account with role `admin`
pub const ADMIN: (&str, &str) = ("user2", "user2");

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Log in and return the session token
pub async fn login(app: &TestApp, (username, password): (&str, &str)) -> String {
    let response = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": username, "password": password }),
        )
        .await;
    assert_eq!(response.status, 200, "login failed: {:?}", response.body);
    response.body["token"]
        .as_str()
        .expect("login returns a token")
        .to_string()
}

/// Create an account through the admin API and log in as it
pub async fn create_and_login(app: &TestApp, admin_token: &str, username: &str, role: &str) -> String {
    let password = format!("{username}-pw");
    let response = app
        .post(
            "/api/users",
            Some(admin_token),
            json!({ "username": username, "password": password, "role": role }),
        )
        .await;
    assert_eq!(response.status, 201, "user creation failed: {:?}", response.body);
    login(app, (username, &password)).await
}
