//! Shared Error Types
//!
//! This module defines error types that are shared between the HTTP layer and
//! the domain code. These errors represent common failure cases that do not
//! depend on the server runtime.
//!
//! # Error Categories
//!
//! - `SerializationError` - A request body that is not valid JSON for its type
//! - `ValidationError` - Field validation failures
//! - `InvalidRecord` - A stored or received record breaks a model invariant
//!
//! # Usage
//!
//! ```rust
//! use contacthub::shared::error::SharedError;
//!
//! let error = SharedError::validation("name", "Name must be at least 2 characters long");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Request body could not be decoded
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Field validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Record invariant violation
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid record error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Field name for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}
