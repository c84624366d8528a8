/**
 * Real-time Event System
 *
 * This module defines the events broadcast to connected clients whenever a
 * contact changes. One event is emitted per committed state change.
 *
 * # Payloads
 *
 * - `contactAdded` / `contactUpdated` - the full contact
 * - `contactLocked` - `{contactId, lockedBy}`
 * - `contactUnlocked` / `contactDeleted` - `{contactId}`
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::contact::Contact;

/// Type of real-time event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    ContactAdded,
    ContactUpdated,
    ContactLocked,
    ContactUnlocked,
    ContactDeleted,
}

impl EventType {
    /// Event name as used on the wire and as the SSE event name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ContactAdded => "contactAdded",
            EventType::ContactUpdated => "contactUpdated",
            EventType::ContactLocked => "contactLocked",
            EventType::ContactUnlocked => "contactUnlocked",
            EventType::ContactDeleted => "contactDeleted",
        }
    }

    /// Parse a wire name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        [
            EventType::ContactAdded,
            EventType::ContactUpdated,
            EventType::ContactLocked,
            EventType::ContactUnlocked,
            EventType::ContactDeleted,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// `{contactId, lockedBy}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LockPayload {
    pub contact_id: Uuid,
    pub locked_by: String,
}

/// `{contactId}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRef {
    pub contact_id: Uuid,
}

/// Event payload
///
/// Untagged on the wire; the variant is implied by `eventType`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EventPayload {
    Contact(Contact),
    Lock(LockPayload),
    Reference(ContactRef),
}

/// Real-time event that can be broadcast to all subscribers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload
    pub payload: EventPayload,
    /// When the event was emitted
    pub timestamp: DateTime<Utc>,
    /// Room the event is addressed to; `None` reaches every subscriber
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl RealtimeEvent {
    fn new(event_type: EventType, payload: EventPayload) -> Self {
        Self {
            event_type,
            payload,
            timestamp: Utc::now(),
            room: None,
        }
    }

    pub fn contact_added(contact: &Contact) -> Self {
        Self::new(EventType::ContactAdded, EventPayload::Contact(contact.clone()))
    }

    pub fn contact_updated(contact: &Contact) -> Self {
        Self::new(EventType::ContactUpdated, EventPayload::Contact(contact.clone()))
    }

    pub fn contact_locked(contact_id: Uuid, locked_by: impl Into<String>) -> Self {
        Self::new(
            EventType::ContactLocked,
            EventPayload::Lock(LockPayload {
                contact_id,
                locked_by: locked_by.into(),
            }),
        )
    }

    pub fn contact_unlocked(contact_id: Uuid) -> Self {
        Self::new(EventType::ContactUnlocked, EventPayload::Reference(ContactRef { contact_id }))
    }

    pub fn contact_deleted(contact_id: Uuid) -> Self {
        Self::new(EventType::ContactDeleted, EventPayload::Reference(ContactRef { contact_id }))
    }

    /// Address the event to a single room
    pub fn in_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// ID of the contact this event is about
    pub fn contact_id(&self) -> Uuid {
        match &self.payload {
            EventPayload::Contact(contact) => contact.id,
            EventPayload::Lock(lock) => lock.contact_id,
            EventPayload::Reference(reference) => reference.contact_id,
        }
    }
}
