//! Backend Module
//!
//! This module contains all server-side code for ContactHub. It provides an
//! Axum HTTP server over a shared contact list with record locking,
//! realtime change notification and role-based user administration.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`contacts`** - Lock manager, contact stores and contact service
//! - **`users`** - Admin-only user management
//! - **`auth`** - Login, JWT tokens, user stores
//! - **`realtime`** - Notification bus and SSE subscriptions
//! - **`middleware`** - Token verification and role checks
//! - **`error`** - Backend error types and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── contacts/       - Contacts and locking
//! ├── users/          - User administration
//! ├── auth/           - Authentication
//! ├── realtime/       - Event broadcasting
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Operation Flow
//!
//! Every contact operation runs fetch, decide, persist, notify:
//!
//! 1. The record is read from the store
//! 2. `LockManager` decides whether the request may proceed
//! 3. The store writes the record if its revision is unchanged
//! 4. The committed change is emitted on the `NotificationBus`
//!
//! A stale write restarts at step 1. Notification is fire-and-forget: a
//! client that is not listening never fails a committed operation.
//!
//! # Thread Safety
//!
//! - Stores are `Arc<dyn Trait>` objects, `Send + Sync`
//! - In-memory stores guard their maps with `tokio::sync::RwLock`
//! - The bus wraps a `tokio::sync::broadcast::Sender`; the room registry sits
//!   behind a `std::sync::Mutex` that is never held across an await
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. `BackendError` implements
//! `IntoResponse` and renders `{"error", "status"}` with the matching status
//! code.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Contacts and record locking
pub mod contacts;

/// User administration
pub mod users;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user stores
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use contacts::{ContactService, LockManager};
pub use error::BackendError;
pub use realtime::{handle_realtime_subscription, NotificationBus};
pub use server::{create_app, AppState};
