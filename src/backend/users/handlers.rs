/**
 * User Administration Handlers
 *
 * HTTP handlers for `/api/users`. Every route here sits behind
 * `auth_middleware` and `require_admin`.
 *
 * # Routes
 *
 * - `GET /api/users?page&limit` - list accounts
 * - `POST /api/users` - create an account (201)
 * - `PUT /api/users/{id}/role` - change an account's role
 * - `DELETE /api/users/{id}` - remove an account
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::contacts::handlers::parse_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::users::service::{CreateUserRequest, UserPage, UserService, DEFAULT_USER_PAGE_SIZE};
use crate::shared::PageRequest;

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub role: Option<String>,
}

/// List users (GET /api/users)
pub async fn list_users(
    State(users): State<Arc<UserService>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserPage>, BackendError> {
    let page = PageRequest::parse(query.page.as_deref(), query.limit.as_deref(), DEFAULT_USER_PAGE_SIZE);
    Ok(Json(users.list(page).await?))
}

/// Create a user (POST /api/users)
///
/// # Example Response
///
/// ```json
/// {
///   "message": "User created successfully",
///   "user": { "id": "...", "username": "carol", "role": "user", "createdAt": "...", "updatedAt": "..." }
/// }
/// ```
pub async fn create_user(
    State(users): State<Arc<UserService>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), BackendError> {
    let Json(request) = payload?;
    let user = users.create(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "user": user })),
    ))
}

/// Change a user's role (PUT /api/users/{id}/role)
pub async fn update_user_role(
    State(users): State<Arc<UserService>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<Json<Value>, BackendError> {
    let id = parse_id(&id, "User")?;
    let Json(request) = payload?;
    let user = users.update_role(&actor, id, request.role.as_deref()).await?;
    Ok(Json(json!({ "message": "User role updated successfully", "user": user })))
}

/// Delete a user (DELETE /api/users/{id})
pub async fn delete_user(
    State(users): State<Arc<UserService>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, BackendError> {
    let id = parse_id(&id, "User")?;
    users.delete(&actor, id).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
