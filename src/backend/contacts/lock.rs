//! Lock Manager
//!
//! Decides whether a lock, unlock or edit request on a single contact may
//! proceed. Decisions are pure: they look only at the record already fetched
//! from the store and at the time the request is judged, and they mutate the
//! in-memory record. Persisting the result is the caller's job.
//!
//! # Rules
//!
//! - `acquire` grants when the record is unlocked, already held by the
//!   requester, or held by someone else for at least the TTL. Otherwise it
//!   reports the current holder.
//! - `release` clears the lock regardless of who holds it.
//! - `authorize_edit` requires the requester to be the recorded holder. It does
//!   not look at the TTL, so an expired lock still belongs to its holder until
//!   someone re-acquires or unlocks it.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::shared::contact::{Contact, RecordLock};
use crate::shared::config::DEFAULT_LOCK_TTL_SECS;

/// Reasons a lock or edit request is refused
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LockError {
    /// Another principal holds a live lock
    #[error("Contact is locked by another user")]
    Conflict {
        /// Current lock holder
        locked_by: String,
    },

    /// The editor does not hold the lock
    #[error("Contact must be locked by you to edit")]
    EditNotLocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockManager {
    ttl: Duration,
}

impl Default for LockManager {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(DEFAULT_LOCK_TTL_SECS as i64),
        }
    }
}

impl LockManager {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Take or refresh the lock on `contact` for `principal`.
    pub fn acquire(
        &self,
        contact: &mut Contact,
        principal: &str,
        now: DateTime<Utc>,
    ) -> Result<(), LockError> {
        if let Some(lock) = &contact.lock {
            if lock.holder != principal && lock.is_live(now, self.ttl) {
                return Err(LockError::Conflict {
                    locked_by: lock.holder.clone(),
                });
            }
        }

        contact.lock = Some(RecordLock::new(principal, now));
        Ok(())
    }

    /// Clear the lock, returning whatever was held.
    pub fn release(&self, contact: &mut Contact) -> Option<RecordLock> {
        contact.lock.take()
    }

    /// Check that `principal` may edit `contact`.
    pub fn authorize_edit(&self, contact: &Contact, principal: &str) -> Result<(), LockError> {
        match contact.locked_by() {
            Some(holder) if holder == principal => Ok(()),
            _ => Err(LockError::EditNotLocked),
        }
    }

    /// Whether `contact` is held by a live lock at `now`
    pub fn is_locked(&self, contact: &Contact, now: DateTime<Utc>) -> bool {
        contact
            .lock
            .as_ref()
            .is_some_and(|lock| lock.is_live(now, self.ttl))
    }

    /// Whether `contact` carries a lock that has outlived the TTL
    pub fn is_expired(&self, contact: &Contact, now: DateTime<Utc>) -> bool {
        contact
            .lock
            .as_ref()
            .is_some_and(|lock| !lock.is_live(now, self.ttl))
    }

    /// Locks acquired strictly before this instant have expired at `now`
    pub fn expiry_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
