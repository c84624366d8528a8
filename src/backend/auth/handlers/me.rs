/**
 * Get Current User Handler
 *
 * This module implements GET /api/auth/me. The route sits behind
 * `auth_middleware`, so the principal has already been verified and
 * re-read from the store.
 */

use axum::response::Json;

use crate::backend::middleware::auth::{AuthUser, Principal};

/// Return the authenticated caller
///
/// # Example Response
///
/// ```json
/// {
///   "userId": "123e4567-e89b-12d3-a456-426614174000",
///   "username": "user1",
///   "role": "user"
/// }
/// ```
pub async fn get_me(AuthUser(principal): AuthUser) -> Json<Principal> {
    tracing::debug!("[Auth] Current user requested by {}", principal.username);
    Json(principal)
}
