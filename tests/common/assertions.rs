//! Response assertions
//!
//! Every error response carries `{"error", "status"}`; these helpers check
//! both at once and report the full body on failure.

use axum::http::StatusCode;

use crate::common::app::TestResponse;

/// Assert the status code, returning the body for further checks
#[track_caller]
pub fn assert_status(response: &TestResponse, status: StatusCode) -> &serde_json::Value {
    assert_eq!(
        response.status, status,
        "expected {}, got {} with body {}",
        status, response.status, response.body
    );
    &response.body
}

/// Assert an error response with the given status and message
#[track_caller]
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    let body = assert_status(response, status);
    assert_eq!(body["error"], message, "unexpected error body {}", body);
    assert_eq!(body["status"], status.as_u16());
}
