//! Contact Record Store
//!
//! The persistence boundary for contacts. The contact service only talks to
//! this trait, so the same orchestration runs against the in-memory store and
//! against PostgreSQL.
//!
//! # Revisions
//!
//! Every saved record carries the revision it was read at. `save` only
//! succeeds if the stored revision still matches, and bumps it by one. A
//! mismatch is reported as `StoreError::StaleRevision` so the caller can
//! re-read and decide again.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::error::StoreError;
use crate::shared::contact::{Contact, ContactFields};

/// Filter applied to listings and counts
///
/// Text filters are case-insensitive substring matches. All set filters must
/// match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Exact match on the creating principal
    pub created_by: Option<String>,
    /// Only records whose lock was acquired strictly before this instant
    pub locked_before: Option<DateTime<Utc>>,
}

impl ContactFilter {
    /// Build a text filter, ignoring blank values
    pub fn text(name: Option<&str>, phone: Option<&str>, address: Option<&str>) -> Self {
        let clean = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            name: clean(name),
            phone: clean(phone),
            address: clean(address),
            ..Self::default()
        }
    }

    pub fn created_by(username: impl Into<String>) -> Self {
        Self {
            created_by: Some(username.into()),
            ..Self::default()
        }
    }

    pub fn locked_before(cutoff: DateTime<Utc>) -> Self {
        Self {
            locked_before: Some(cutoff),
            ..Self::default()
        }
    }

    /// Evaluate the filter against a record in memory
    pub fn matches(&self, contact: &Contact) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            needle
                .as_ref()
                .is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
        }

        contains(&contact.name, &self.name)
            && contains(&contact.phone, &self.phone)
            && contains(&contact.address, &self.address)
            && self
                .created_by
                .as_ref()
                .is_none_or(|creator| contact.created_by.as_ref() == Some(creator))
            && self
                .locked_before
                .is_none_or(|cutoff| contact.locked_at().is_some_and(|at| at < cutoff))
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactSort {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// A filtered, sorted page of contacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
    pub filter: ContactFilter,
    pub sort: ContactSort,
    pub skip: u64,
    pub limit: u64,
}

impl ContactQuery {
    pub fn new(filter: ContactFilter) -> Self {
        Self {
            filter,
            sort: ContactSort::default(),
            skip: 0,
            limit: u64::MAX,
        }
    }

    pub fn page(mut self, skip: u64, limit: u64) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }

    pub fn sorted(mut self, sort: ContactSort) -> Self {
        self.sort = sort;
        self
    }
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Records matching the query, in query order
    async fn find(&self, query: &ContactQuery) -> Result<Vec<Contact>, StoreError>;

    /// Number of records matching the filter
    async fn count(&self, filter: &ContactFilter) -> Result<u64, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, StoreError>;

    /// Persist a new, unlocked record and return it with its assigned id
    async fn create(
        &self,
        fields: ContactFields,
        created_by: Option<String>,
    ) -> Result<Contact, StoreError>;

    /// Write back a record read earlier.
    ///
    /// Fails with `StaleRevision` if someone else saved it in the meantime and
    /// with `Missing` if it has been deleted.
    async fn save(&self, contact: &Contact) -> Result<Contact, StoreError>;

    /// Remove a record, returning it if it existed
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Contact>, StoreError>;
}
