/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used by the services and HTTP handlers and can be
 * converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Request Errors
 *
 * - Field validation failures (400)
 * - Missing or invalid credentials (401)
 * - Role and ownership checks (403)
 * - Missing records (404)
 * - Duplicate usernames (409)
 *
 * ## Lock Errors
 *
 * - Record locked by another principal (423, carries the holder)
 * - Edit attempted without holding the lock (423)
 *
 * ## Store Errors
 *
 * Unexpected persistence failures. These are logged in full and reported to
 * the client as a generic server error.
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::contacts::lock::LockError;
use crate::shared::SharedError;

/// Persistence errors raised by record stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected or failed the query
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The record was saved by another writer since it was read
    #[error("Record {id} was modified concurrently")]
    StaleRevision { id: Uuid },

    /// The record was deleted since it was read
    #[error("Record {id} no longer exists")]
    Missing { id: Uuid },

    /// A unique key already exists
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// A stored row breaks a model invariant
    #[error(transparent)]
    Corrupt(#[from] SharedError),
}

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use contacthub::backend::error::BackendError;
///
/// let err = BackendError::not_found("Contact");
/// let err = BackendError::forbidden("Cannot delete your own account");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Validation and other shared errors
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Lock conflicts and unlocked edits
    #[error(transparent)]
    Lock(#[from] LockError),

    /// Record absent
    #[error("{resource} not found")]
    NotFound {
        /// Kind of record that was looked up
        resource: &'static str,
    },

    /// Role or ownership check failed
    #[error("{message}")]
    Forbidden { message: String },

    /// Missing or invalid credentials
    #[error("{message}")]
    Unauthorized { message: String },

    /// Unique constraint violated by the request
    #[error("{message}")]
    Conflict { message: String },

    /// Unexpected persistence failure
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 for validation and serialization, 500 for invalid records
    /// - `Lock` - 423 Locked
    /// - `NotFound` - 404, `Forbidden` - 403, `Unauthorized` - 401, `Conflict` - 409
    /// - `Store` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::InvalidRecord { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Lock(_) => StatusCode::LOCKED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Server-side failures are reported generically; the detail stays in the logs.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(SharedError::InvalidRecord { .. }) | Self::Store(_) => {
                "Server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Current lock holder, for lock conflicts
    pub fn locked_by(&self) -> Option<&str> {
        match self {
            Self::Lock(LockError::Conflict { locked_by }) => Some(locked_by),
            _ => None,
        }
    }
}

/// Malformed or missing JSON bodies keep the JSON error shape
///
/// A body that arrived but could not be decoded is a 400 serialization error;
/// other rejections keep the status axum chose.
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                Self::SharedError(SharedError::serialization(rejection.body_text()))
            }
            other => Self::handler(other.status(), other.body_text()),
        }
    }
}
