//! Server Module
//!
//! This module contains the code that initializes and configures the Axum
//! HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Database connection, migrations and startup errors
//! - **`init`** - Store selection and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # State Management
//!
//! `AppState` holds the contact service, the user stores and services, the
//! token issuer, the notification bus and the configuration. Handlers
//! extract the parts they need through `FromRef`.
//!
//! # Initialization Flow
//!
//! 1. **Store Selection**: PostgreSQL if `DATABASE_URL` is set, memory otherwise
//! 2. **State Creation**: Lock manager, notification bus, services
//! 3. **Seeding**: Default accounts, if enabled
//! 4. **Background Tasks**: Expired-lock reaper, if configured
//! 5. **Router Creation**: Routes, CORS and request tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use contacthub::backend::server::create_app;
//! use contacthub::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::builder().build()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database loading and startup errors
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::StartupError;
pub use init::{create_app, create_state};
pub use state::AppState;
