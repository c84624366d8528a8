//! User Administration Module
//!
//! Admin-only management of accounts: listing, creation, role changes and
//! deletion. Authentication itself lives in [`crate::backend::auth`].
//!
//! # Module Structure
//!
//! ```text
//! users/
//! ├── mod.rs       - Module exports
//! ├── service.rs   - Guards and store calls
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod service;

pub mod handlers;

pub use handlers::{create_user, delete_user, list_users, update_user_role};
pub use service::{CreateUserRequest, UserPage, UserService};
