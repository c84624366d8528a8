//! Authentication Module
//!
//! This module handles user authentication and session management. It
//! provides the account model and stores, JWT tokens, and the HTTP handlers
//! for the authentication endpoints.
//!
//! # Architecture
//!
//! - **`users`** - User model, roles, `UserStore` trait, bcrypt checks, seeding
//! - **`memory`** - In-memory user store
//! - **`db`** - PostgreSQL user store
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and store trait
//! ├── memory.rs       - In-memory store
//! ├── db.rs           - PostgreSQL store
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Tokens expire after `JWT_EXPIRES_IN_SECS` (24 hours by default)
//! - Invalid credentials return 401 (no information leakage)

/// User data model and store trait
pub mod users;

/// In-memory user store
pub mod memory;

/// PostgreSQL user store
pub mod db;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{get_me, login, AuthResponse, LoginRequest, UserResponse};
pub use sessions::{Claims, TokenIssuer};
pub use users::{Role, User, UserStore};
