//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, CORS, tracing and the 404 fallback
//! - **`api_routes`** - `/api` endpoints and their authentication layers
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint routes
//! ```
//!
//! # Route Types
//!
//! ## Public
//!
//! - `GET /api/health` - Liveness check
//! - `POST /api/auth/login` - User login
//! - `GET /realtime` - Server-Sent Events stream
//! - `POST /realtime/rooms` - Join a room
//!
//! ## Authenticated
//!
//! - `GET /api/auth/me` - Current user
//! - `/api/contacts/...` - Contact operations
//!
//! ## Admin
//!
//! - `/api/users/...` - User administration

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
