//! ContactHub - Main Library
//!
//! ContactHub is a contact-management backend built with Rust. Authenticated
//! users share a single contact list, edit records under short-lived
//! optimistic locks, and receive every committed change in realtime.
//!
//! # Overview
//!
//! This library provides:
//! - Contact CRUD with field validation and filtered, paginated listing
//! - Record locking with a five minute expiry window
//! - Realtime fan-out of contact events over Server-Sent Events
//! - JWT authentication and admin-only user management
//!
//! # Module Structure
//!
//! - **`shared`** - Types that cross the wire
//!   - Contact records, realtime events, pagination metadata
//!   - Field validation and shared error types
//!   - Application configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and routing
//!   - Lock manager, contact service, record stores
//!   - Authentication, user administration, notification bus
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server-side code (enabled by default)
//!   - Includes Axum server, sqlx stores, bcrypt and JWT
//!
//! # Usage
//!
//! ```rust,no_run
//! use contacthub::backend::server::init::create_app;
//! use contacthub::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - Record stores are `Send + Sync` trait objects shared through `Arc`
//! - The notification bus wraps a `tokio::sync::broadcast::Sender`
//! - Lock decisions are pure functions over a fetched record

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
