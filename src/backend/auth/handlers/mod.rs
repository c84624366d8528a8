//! Authentication Handlers Module
//!
//! This module contains the HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── login.rs    - User authentication handler
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`get_me`** - GET /api/auth/me - Get current user info
//!
//! # Authentication Flow
//!
//! 1. **Login**: User provides username and password → Credentials verified → JWT token returned
//! 2. **Get Me**: User provides JWT token → Token verified → User info returned

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, UserResponse};

// Re-export handlers
pub use login::login;
pub use me::get_me;
