/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Check that username and password are present
 * 2. Look up the user and verify the password using bcrypt
 * 3. Generate a JWT token
 * 4. Return the token with the user's id, name and role
 *
 * # Security
 *
 * - Unknown users and wrong passwords both return 401 "Invalid credentials"
 * - User passwords are never logged or returned in responses
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::users::authenticate;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::SharedError;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If username or password is missing
/// * `401 Unauthorized` - If the user is not found or the password is incorrect
/// * `500 Internal Server Error` - If the store or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "user1",
///   "password": "user1"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "username": "user1",
///   "userId": "123e4567-e89b-12d3-a456-426614174000",
///   "role": "user"
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    let Json(request) = payload?;
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(SharedError::validation("username", "Username and password required").into());
    }
    tracing::info!("[Auth] Login request for: {}", request.username);

    let user = authenticate(app_state.users.as_ref(), &request.username, &request.password).await?;

    let token = app_state.sessions.create_token(&user).map_err(|e| {
        tracing::error!("[Auth] Failed to create token: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    tracing::info!("[Auth] User logged in: {} ({})", user.username, user.role);

    Ok(Json(AuthResponse {
        token,
        username: user.username,
        user_id: user.id,
        role: user.role,
    }))
}
