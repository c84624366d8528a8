//! Contact API integration tests
//!
//! CRUD, filtering and the lock lifecycle over HTTP.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{assert_error, assert_status, login, TestApp, ADMIN, USER};

async fn create(app: &TestApp, token: &str, name: &str, phone: &str, address: &str) -> Value {
    let response = app
        .post(
            "/api/contacts",
            Some(token),
            json!({ "name": name, "phone": phone, "address": address }),
        )
        .await;
    assert_status(&response, StatusCode::CREATED).clone()
}

fn id_of(contact: &Value) -> String {
    contact["id"].as_str().expect("contact id").to_string()
}

#[tokio::test]
async fn test_create_and_get() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;

    let contact = create(&app, &token, "  Al Pine ", "+1 555-0100", "1 Rd").await;
    assert_eq!(contact["name"], "Al Pine");
    assert_eq!(contact["createdBy"], "user1");
    assert!(contact["lockedBy"].is_null());
    assert!(contact["lockedAt"].is_null());

    let response = app.get(&format!("/api/contacts/{}", id_of(&contact)), Some(&token)).await;
    let fetched = assert_status(&response, StatusCode::OK);
    assert_eq!(fetched["id"], contact["id"]);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;

    let response = app
        .post("/api/contacts", Some(&token), json!({ "name": "Al Pine" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Name, phone, and address are required");

    let response = app
        .post(
            "/api/contacts",
            Some(&token),
            json!({ "name": "Al Pine", "phone": "call me", "address": "1 Rd" }),
        )
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Invalid phone number format");
}

#[tokio::test]
async fn test_null_and_non_text_fields_are_missing() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;

    for body in [
        json!({ "name": null, "phone": "555", "address": "1 Rd" }),
        json!({ "name": 42, "phone": "555", "address": "1 Rd" }),
        json!({ "name": "Al Pine", "phone": ["555"], "address": "1 Rd" }),
    ] {
        let response = app.post("/api/contacts", Some(&token), body).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "Name, phone, and address are required");
    }

    let contact = create(&app, &token, "Al Pine", "+1 555-0100", "1 Rd").await;
    let uri = format!("/api/contacts/{}", id_of(&contact));
    let edit = json!({ "name": null, "phone": "555", "address": "1 Rd" });

    // the lock is checked before the fields
    let response = app.put(&uri, Some(&token), edit.clone()).await;
    assert_error(&response, StatusCode::LOCKED, "Contact must be locked by you to edit");

    assert_status(&app.post(&format!("{uri}/lock"), Some(&token), json!({})).await, StatusCode::OK);
    let response = app.put(&uri, Some(&token), edit).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "Name, phone, and address are required");
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;

    let response = app.get("/api/contacts/not-a-uuid", Some(&token)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Contact not found");

    let missing = uuid::Uuid::new_v4();
    let response = app
        .post(&format!("/api/contacts/{missing}/lock"), Some(&token), json!({}))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "Contact not found");

    let response = app.delete(&format!("/api/contacts/{missing}"), Some(&token)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Contact not found");
}

#[tokio::test]
async fn test_list_filters_and_pagination() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;

    for i in 0..7 {
        app.advance_minutes(1);
        create(&app, &token, &format!("Person {i}"), "555-0100", "Main Street").await;
    }
    app.advance_minutes(1);
    create(&app, &token, "Zed Quill", "555-0199", "Elm Avenue").await;

    let response = app.get("/api/contacts", Some(&token)).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["contacts"].as_array().unwrap().len(), 5);
    assert_eq!(body["contacts"][0]["name"], "Zed Quill");
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 1,
            "totalPages": 2,
            "totalContacts": 8,
            "hasNext": true,
            "hasPrev": false
        })
    );

    let response = app.get("/api/contacts?page=2&limit=5", Some(&token)).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["contacts"].as_array().unwrap().len(), 3);
    assert_eq!(body["pagination"]["hasPrev"], true);
    assert_eq!(body["pagination"]["hasNext"], false);

    let response = app.get("/api/contacts?name=person&address=MAIN", Some(&token)).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["pagination"]["totalContacts"], 7);

    let response = app.get("/api/contacts?phone=0199&page=abc&limit=-2", Some(&token)).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["contacts"].as_array().unwrap().len(), 1);
    assert_eq!(body["contacts"][0]["name"], "Zed Quill");
}

#[tokio::test]
async fn test_lock_conflict_and_expiry() {
    let app = TestApp::new().await;
    let alice = login(&app, USER).await;
    let bob = login(&app, ADMIN).await;
    let contact = create(&app, &alice, "Al Pine", "+1 555-0100", "1 Rd").await;
    let lock_uri = format!("/api/contacts/{}/lock", id_of(&contact));

    let response = app.post(&lock_uri, Some(&alice), json!({})).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["message"], "Contact locked successfully");
    assert_eq!(body["contact"]["lockedBy"], "user1");

    app.advance_minutes(1);
    let response = app.post(&lock_uri, Some(&bob), json!({})).await;
    assert_error(&response, StatusCode::LOCKED, "Contact is locked by another user");
    assert_eq!(response.body["lockedBy"], "user1");

    app.advance_minutes(5);
    let response = app.post(&lock_uri, Some(&bob), json!({})).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["contact"]["lockedBy"], "user2");
}

#[tokio::test]
async fn test_edit_requires_lock_and_releases_it() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;
    let contact = create(&app, &token, "Al Pine", "+1 555-0100", "1 Rd").await;
    let uri = format!("/api/contacts/{}", id_of(&contact));
    let edit = json!({ "name": "Al Pine Jr", "phone": "+1 555-0100", "address": "2 Rd", "notes": "moved" });

    let response = app.put(&uri, Some(&token), edit.clone()).await;
    assert_error(&response, StatusCode::LOCKED, "Contact must be locked by you to edit");

    assert_status(&app.post(&format!("{uri}/lock"), Some(&token), json!({})).await, StatusCode::OK);

    let response = app.put(&uri, Some(&token), edit).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["name"], "Al Pine Jr");
    assert_eq!(body["notes"], "moved");
    assert!(body["lockedBy"].is_null());
    assert!(body["lockedAt"].is_null());
}

#[tokio::test]
async fn test_anyone_may_unlock() {
    let app = TestApp::new().await;
    let alice = login(&app, USER).await;
    let bob = login(&app, ADMIN).await;
    let contact = create(&app, &alice, "Al Pine", "+1 555-0100", "1 Rd").await;
    let uri = format!("/api/contacts/{}", id_of(&contact));

    assert_status(&app.post(&format!("{uri}/lock"), Some(&alice), json!({})).await, StatusCode::OK);

    let response = app.post(&format!("{uri}/unlock"), Some(&bob), json!({})).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["message"], "Contact unlocked successfully");
    assert!(body["contact"]["lockedBy"].is_null());
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;
    let contact = create(&app, &token, "Al Pine", "+1 555-0100", "1 Rd").await;
    let uri = format!("/api/contacts/{}", id_of(&contact));

    let response = app.delete(&uri, Some(&token)).await;
    let body = assert_status(&response, StatusCode::OK);
    assert_eq!(body["message"], "Contact deleted successfully");

    assert_error(&app.get(&uri, Some(&token)).await, StatusCode::NOT_FOUND, "Contact not found");
}

#[tokio::test]
async fn test_malformed_json_keeps_error_shape() {
    let app = TestApp::new().await;
    let token = login(&app, USER).await;

    let response = app
        .send(
            axum::http::Method::POST,
            "/api/contacts",
            Some(&token),
            Some(Value::String("not an object".to_string())),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
    assert!(response.body["error"].as_str().unwrap().starts_with("Serialization error:"));
}
