//! In-process application for integration tests
//!
//! Requests go straight into the router with `tower::ServiceExt::oneshot`;
//! nothing listens on a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use contacthub::backend::auth::users::seed_default_users;
use contacthub::backend::contacts::ManualClock;
use contacthub::backend::routes::create_router;
use contacthub::backend::server::AppState;
use contacthub::shared::AppConfig;
use serde_json::Value;
use tower::ServiceExt;

/// Lowest cost bcrypt accepts; keeps seeding fast
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret("integration-test-secret")
        .bcrypt_cost(TEST_BCRYPT_COST)
        .broadcast_capacity(64)
        .build()
        .expect("test configuration is valid")
}

/// A router over fresh in-memory stores with `user1` and `user2` seeded
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: ManualClock,
}

/// Status and parsed JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let clock = ManualClock::default();
        let state = AppState::in_memory(config, Arc::new(clock.clone()));
        seed_default_users(state.users.as_ref(), TEST_BCRYPT_COST)
            .await
            .expect("seeding default users");
        let router = create_router(state.clone());
        Self { router, state, clock }
    }

    /// Move lock time forward
    pub fn advance_minutes(&self, minutes: i64) {
        self.clock.advance(Duration::minutes(minutes));
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, crate::common::auth_header(token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None).await
    }
}
