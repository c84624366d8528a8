//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in services and HTTP handlers and can be converted
//! to HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Error Types
//!
//! - `BackendError` - Everything a request can fail with
//! - `StoreError` - Failures raised by record stores
//!
//! # Example
//!
//! ```rust,no_run
//! use contacthub::backend::error::BackendError;
//! use axum::response::Response;
//!
//! # async fn example() -> Result<Response, BackendError> {
//! Err(BackendError::not_found("Contact"))
//! # }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, StoreError};
