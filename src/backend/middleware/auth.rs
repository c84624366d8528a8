/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the caller's identity to handlers.
 *
 * The user is re-read from the store on every request, so deleted accounts
 * are rejected and role changes take effect immediately.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::auth::users::{Role, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated caller, attached to request extensions
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("[Auth] Missing Authorization header");
            BackendError::unauthorized("Access token required")
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("[Auth] Invalid Authorization header format");
            BackendError::unauthorized("Access token required")
        })
}

/// Authentication middleware
///
/// 1. Extracts the JWT from the Authorization header
/// 2. Verifies it
/// 3. Loads the user it names
/// 4. Attaches a `Principal` to the request extensions
///
/// Returns 401 if the token is missing, invalid, expired, or names a user
/// that no longer exists.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;

    let claims = app_state.sessions.verify_token(token).map_err(|e| {
        tracing::warn!("[Auth] Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!("[Auth] Invalid user ID in token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user = app_state.users.find_by_id(user_id).await?.ok_or_else(|| {
        tracing::warn!("[Auth] Token for deleted user {}", user_id);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    request.extensions_mut().insert(Principal::from(&user));
    Ok(next.run(request).await)
}

/// Reject callers without the admin role. Runs after `auth_middleware`.
pub async fn require_admin(
    AuthUser(principal): AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    if !principal.is_admin() {
        tracing::warn!("[Auth] {} denied admin route", principal.username);
        return Err(BackendError::forbidden("Admin access required"));
    }
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated caller
///
/// Reads the `Principal` placed in the request extensions by
/// `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts.extensions.get::<Principal>().cloned().ok_or_else(|| {
            tracing::warn!("[Auth] Principal not found in request extensions");
            BackendError::unauthorized("Access token required")
        })?;

        Ok(AuthUser(principal))
    }
}
