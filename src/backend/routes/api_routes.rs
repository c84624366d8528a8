/**
 * API Route Handlers
 *
 * This module defines the `/api` routes and the authentication layers that
 * guard them.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/login` - User login (public)
 * - `GET /api/auth/me` - Get current user info
 *
 * ## Contacts (any authenticated user)
 * - `GET /api/contacts`, `POST /api/contacts`
 * - `GET /api/contacts/{id}`, `PUT /api/contacts/{id}`, `DELETE /api/contacts/{id}`
 * - `POST /api/contacts/{id}/lock`, `POST /api/contacts/{id}/unlock`
 *
 * ## Users (admin only)
 * - `GET /api/users`, `POST /api/users`
 * - `PUT /api/users/{id}/role`, `DELETE /api/users/{id}`
 */

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login};
use crate::backend::contacts::handlers::{
    create_contact, delete_contact, get_contact, list_contacts, lock_contact, unlock_contact,
    update_contact,
};
use crate::backend::middleware::{auth_middleware, require_admin};
use crate::backend::server::state::AppState;
use crate::backend::users::{create_user, delete_user, list_users, update_user_role};

/// Configure API routes
///
/// # Authentication
///
/// Routes other than login require a JWT in the `Authorization` header.
/// `route_layer` only wraps routes that matched, so unknown paths still fall
/// through to the 404 handler instead of answering 401. The user routes run
/// `require_admin` after `auth_middleware`.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route(
            "/api/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/api/contacts/{id}/lock", post(lock_contact))
        .route("/api/contacts/{id}/unlock", post(unlock_contact))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    // Layers run outside-in: authentication first, then the role check
    let admin = Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", axum::routing::delete(delete_user))
        .route("/api/users/{id}/role", put(update_user_role))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    router
        .route("/api/auth/login", post(login))
        .merge(authenticated)
        .merge(admin)
}
