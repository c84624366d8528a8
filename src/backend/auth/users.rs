/**
 * User Model and Store
 *
 * This module defines accounts, their roles, and the `UserStore` trait the
 * rest of the backend talks to. Two implementations exist: an in-memory map
 * (`auth::memory`) and PostgreSQL (`auth::db`).
 *
 * Passwords are only ever held as bcrypt hashes.
 */

use std::fmt;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::{BackendError, StoreError};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse `user` or `admin`, exactly
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars)
    pub username: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: String, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Newest-first page of users
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<User>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// Insert a new account. Fails with `StoreError::Duplicate` if the
    /// username is taken.
    async fn create(&self, username: &str, password_hash: String, role: Role) -> Result<User, StoreError>;

    /// Change a user's role, returning the updated user if it exists
    async fn update_role(&self, id: Uuid, role: Role) -> Result<Option<User>, StoreError>;

    /// Remove a user, returning it if it existed
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// Hash a password with bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, BackendError> {
    bcrypt::hash(password, cost).map_err(|e| {
        tracing::error!("[Auth] Password hashing failed: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })
}

/// Check a username and password against the store
///
/// Unknown users and wrong passwords are reported identically.
pub async fn authenticate(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<User, BackendError> {
    let user = store.find_by_username(username.trim()).await?.ok_or_else(|| {
        tracing::warn!("[Auth] Login for unknown user: {}", username);
        BackendError::unauthorized("Invalid credentials")
    })?;

    let valid = bcrypt::verify(password, &user.password_hash).map_err(|e| {
        tracing::error!("[Auth] Password verification error: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    if !valid {
        tracing::warn!("[Auth] Invalid password for user: {}", username);
        return Err(BackendError::unauthorized("Invalid credentials"));
    }

    Ok(user)
}

/// Accounts created at startup when seeding is enabled
pub const DEFAULT_USERS: [(&str, &str, Role); 2] = [
    ("user1", "user1", Role::User),
    ("user2", "user2", Role::Admin),
];

/// Create the default accounts that do not exist yet
///
/// Returns the number of accounts created.
pub async fn seed_default_users(store: &dyn UserStore, bcrypt_cost: u32) -> Result<usize, BackendError> {
    let mut created = 0;
    for (username, password, role) in DEFAULT_USERS {
        if store.find_by_username(username).await?.is_some() {
            continue;
        }

        let password_hash = hash_password(password, bcrypt_cost)?;
        match store.create(username, password_hash, role).await {
            Ok(_) => {
                tracing::info!("[Auth] Default user {} ({}) created", username, role);
                created += 1;
            }
            // Another instance seeded it first
            Err(StoreError::Duplicate(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(created)
}
