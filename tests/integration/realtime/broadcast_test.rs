//! Real-time broadcast integration tests
//!
//! Opens `/realtime` through the router and reads SSE frames as a client
//! would.

use std::time::Duration;

use axum::body::{Body, BodyDataStream};
use axum::http::{Request, StatusCode};
use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::time::timeout;
use tower::ServiceExt;

use crate::common::{assert_status, login, TestApp, USER};

/// An open SSE stream
struct EventStream {
    body: BodyDataStream,
}

impl EventStream {
    async fn open(app: &TestApp, query: &str) -> Self {
        let request = Request::builder()
            .uri(format!("/realtime{query}"))
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/event-stream");
        Self {
            body: response.into_body().into_data_stream(),
        }
    }

    /// Next `(event name, data)` pair, skipping keep-alive comments
    async fn next(&mut self) -> (String, Value) {
        loop {
            let chunk = timeout(Duration::from_secs(2), self.body.next())
                .await
                .expect("event arrives in time")
                .expect("stream is open")
                .expect("chunk reads");
            let text = String::from_utf8(chunk.to_vec()).unwrap();

            let mut name = None;
            let mut data = None;
            for line in text.lines() {
                if let Some(value) = line.strip_prefix("event:") {
                    name = Some(value.trim().to_string());
                } else if let Some(value) = line.strip_prefix("data:") {
                    data = Some(serde_json::from_str(value.trim()).unwrap());
                }
            }
            if let (Some(name), Some(data)) = (name, data) {
                return (name, data);
            }
        }
    }

    /// Assert nothing is delivered for a short while
    async fn assert_quiet(&mut self) {
        let next = timeout(Duration::from_millis(100), self.body.next()).await;
        assert!(next.is_err(), "unexpected frame: {:?}", next);
    }
}

#[tokio::test]
async fn test_first_event_is_connected() {
    let app = TestApp::new().await;
    let mut stream = EventStream::open(&app, "").await;

    let (name, data) = stream.next().await;
    assert_eq!(name, "connected");
    let connection_id: uuid::Uuid = data["connectionId"].as_str().unwrap().parse().unwrap();
    assert_eq!(app.state.bus.connection_count(), 1);
    assert!(app.state.bus.rooms_of(connection_id).is_some());
}

#[tokio::test]
async fn test_contact_lifecycle_is_streamed_in_order() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;
    let mut stream = EventStream::open(&app, "").await;
    stream.next().await;

    let response = app
        .post(
            "/api/contacts",
            Some(&token),
            json!({ "name": "Al Pine", "phone": "+1 555-0100", "address": "1 Rd" }),
        )
        .await;
    let contact = assert_status(&response, StatusCode::CREATED).clone();
    let id = contact["id"].as_str().unwrap();

    let (name, data) = stream.next().await;
    assert_eq!(name, "contactAdded");
    assert_eq!(data["eventType"], "contactAdded");
    assert_eq!(data["payload"], contact);

    app.post(&format!("/api/contacts/{id}/lock"), Some(&token), json!({})).await;
    let (name, data) = stream.next().await;
    assert_eq!(name, "contactLocked");
    assert_eq!(data["payload"], json!({ "contactId": id, "lockedBy": "user1" }));

    app.put(
        &format!("/api/contacts/{id}"),
        Some(&token),
        json!({ "name": "Al Pine Jr", "phone": "+1 555-0100", "address": "1 Rd" }),
    )
    .await;
    let (name, data) = stream.next().await;
    assert_eq!(name, "contactUpdated");
    assert_eq!(data["payload"]["name"], "Al Pine Jr");
    let (name, _) = stream.next().await;
    assert_eq!(name, "contactUnlocked");

    app.delete(&format!("/api/contacts/{id}"), Some(&token)).await;
    let (name, data) = stream.next().await;
    assert_eq!(name, "contactDeleted");
    assert_eq!(data["payload"], json!({ "contactId": id }));
}

#[tokio::test]
async fn test_type_filter() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;
    let mut stream = EventStream::open(&app, "?types=contactLocked").await;
    stream.next().await;

    let response = app
        .post(
            "/api/contacts",
            Some(&token),
            json!({ "name": "Al Pine", "phone": "+1 555-0100", "address": "1 Rd" }),
        )
        .await;
    let id = response.body["id"].as_str().unwrap().to_string();
    app.post(&format!("/api/contacts/{id}/lock"), Some(&token), json!({})).await;

    let (name, _) = stream.next().await;
    assert_eq!(name, "contactLocked");
}

#[tokio::test]
async fn test_join_room() {
    let app = TestApp::new().await;
    let mut stream = EventStream::open(&app, "").await;
    let (_, data) = stream.next().await;
    let connection_id = data["connectionId"].as_str().unwrap().to_string();

    let response = app
        .post(
            "/realtime/rooms",
            None,
            json!({ "connectionId": connection_id, "room": "team-a" }),
        )
        .await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["room"], "team-a");

    let response = app
        .post(
            "/realtime/rooms",
            None,
            json!({ "connectionId": uuid::Uuid::new_v4(), "room": "team-a" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Room-addressed events reach members only
    app.state
        .bus
        .emit(contacthub::shared::RealtimeEvent::contact_deleted(uuid::Uuid::new_v4()).in_room("team-b"));
    stream.assert_quiet().await;

    let target = uuid::Uuid::new_v4();
    app.state
        .bus
        .emit(contacthub::shared::RealtimeEvent::contact_deleted(target).in_room("team-a"));
    let (name, data) = stream.next().await;
    assert_eq!(name, "contactDeleted");
    assert_eq!(data["payload"]["contactId"], target.to_string());
}
