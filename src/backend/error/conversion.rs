/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Contact is locked by another user",
 *   "status": 423,
 *   "lockedBy": "alice"
 * }
 * ```
 *
 * `lockedBy` is only present for lock conflicts.
 */

use axum::{
    response::{IntoResponse, Json, Response},
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("[Backend] Request failed: {}", self);
        } else {
            tracing::debug!("[Backend] Request rejected ({}): {}", status.as_u16(), self);
        }

        let mut body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });
        if let Some(holder) = self.locked_by() {
            body["lockedBy"] = serde_json::Value::String(holder.to_string());
        }

        (status, Json(body)).into_response()
    }
}
