//! Shared Module
//!
//! This module contains types and data structures that cross the wire:
//! contact records, realtime events, pagination metadata and the error and
//! configuration types used on both sides of the HTTP boundary.
//!
//! # Overview
//!
//! Everything in here is platform-agnostic. None of it touches the network or
//! the database, so it can be reused by a client crate as-is.

/// Contact record and lock state
pub mod contact;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Field validation for contacts and users
pub mod validation;

/// Pagination request parsing and metadata
pub mod pagination;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use contact::{Contact, ContactDraft, RecordLock};
pub use event::{RealtimeEvent, EventType, EventPayload};
pub use error::SharedError;
pub use pagination::{PageRequest, Pagination};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
