//! Contact Data Structure
//!
//! Represents a record in the shared contact list, together with its
//! optimistic edit lock.
//!
//! # Wire Format
//!
//! On the wire a contact carries two nullable fields, `lockedBy` and
//! `lockedAt`. In memory they are a single `Option<RecordLock>`, so a contact
//! can never hold one without the other. Documents that set only one of the
//! two are rejected during deserialization.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Lock held on a contact by a single principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLock {
    /// Username of the lock holder
    pub holder: String,
    /// When the lock was last acquired or refreshed
    pub acquired_at: DateTime<Utc>,
}

impl RecordLock {
    pub fn new(holder: impl Into<String>, acquired_at: DateTime<Utc>) -> Self {
        Self {
            holder: holder.into(),
            acquired_at,
        }
    }

    /// Whether the lock is still inside its expiry window at `now`.
    ///
    /// The window is half-open: a lock aged exactly `ttl` has expired.
    pub fn is_live(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.acquired_at < ttl
    }
}

/// A contact in the shared list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ContactDocument", try_from = "ContactDocument")]
pub struct Contact {
    /// Unique contact ID, assigned by the store
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Free-form notes, empty when absent
    pub notes: String,
    /// Current edit lock, if any
    pub lock: Option<RecordLock>,
    /// Username of the principal that created the record
    pub created_by: Option<String>,
    /// Store-maintained write counter
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Build a fresh, unlocked record from validated fields.
    ///
    /// Stores call this when persisting a new contact.
    pub fn new(fields: ContactFields, created_by: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            phone: fields.phone,
            address: fields.address,
            notes: fields.notes,
            lock: None,
            created_by,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Username of the current lock holder
    pub fn locked_by(&self) -> Option<&str> {
        self.lock.as_ref().map(|lock| lock.holder.as_str())
    }

    /// When the current lock was acquired
    pub fn locked_at(&self) -> Option<DateTime<Utc>> {
        self.lock.as_ref().map(|lock| lock.acquired_at)
    }

    /// Replace the editable fields with validated values
    pub fn apply_fields(&mut self, fields: ContactFields) {
        self.name = fields.name;
        self.phone = fields.phone;
        self.address = fields.address;
        self.notes = fields.notes;
    }
}

/// Contact fields as submitted by a client, before validation
///
/// Any field that is missing, `null` or not a string reads as absent, so
/// malformed input is reported by validation rather than by the JSON layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "text_or_none")]
    pub notes: Option<String>,
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_or_none(deserializer)?.unwrap_or_default())
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Trimmed, validated contact fields
///
/// Only produced by [`crate::shared::validation::validate_contact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

/// Wire and row representation of a contact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ContactDocument {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub locked_by: Option<String>,
    #[serde(default)]
    pub locked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactDocument {
    fn from(contact: Contact) -> Self {
        let (locked_by, locked_at) = match contact.lock {
            Some(lock) => (Some(lock.holder), Some(lock.acquired_at)),
            None => (None, None),
        };
        Self {
            id: contact.id,
            name: contact.name,
            phone: contact.phone,
            address: contact.address,
            notes: contact.notes,
            locked_by,
            locked_at,
            created_by: contact.created_by,
            revision: contact.revision,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

impl TryFrom<ContactDocument> for Contact {
    type Error = SharedError;

    fn try_from(doc: ContactDocument) -> Result<Self, Self::Error> {
        let holder = doc.locked_by.filter(|holder| !holder.is_empty());
        let lock = match (holder, doc.locked_at) {
            (Some(holder), Some(acquired_at)) => Some(RecordLock { holder, acquired_at }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(SharedError::invalid_record(format!(
                    "contact {} has lockedBy without lockedAt",
                    doc.id
                )))
            }
            (None, Some(_)) => {
                return Err(SharedError::invalid_record(format!(
                    "contact {} has lockedAt without lockedBy",
                    doc.id
                )))
            }
        };

        Ok(Self {
            id: doc.id,
            name: doc.name,
            phone: doc.phone,
            address: doc.address,
            notes: doc.notes,
            lock,
            created_by: doc.created_by,
            revision: doc.revision,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}
