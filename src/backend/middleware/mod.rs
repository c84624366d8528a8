//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//! Middleware functions process requests before they reach handlers.
//!
//! # Architecture
//!
//! - **`auth`** - Bearer token authentication and the admin role check
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use contacthub::backend::middleware::{auth_middleware, require_admin};
//! use contacthub::backend::server::state::AppState;
//!
//! # fn example(state: AppState) {
//! let admin: Router<AppState> = Router::new()
//!     .route("/api/users", get(|| async { "ok" }))
//!     .route_layer(middleware::from_fn(require_admin))
//!     .route_layer(middleware::from_fn_with_state(state, auth_middleware));
//! # }
//! ```

pub mod auth;

pub use auth::{auth_middleware, require_admin, AuthUser, Principal};
