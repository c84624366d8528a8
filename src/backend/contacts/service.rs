//! Contact Service
//!
//! Runs every contact operation as fetch, decide, persist, notify. Each step
//! commits before the next starts; a failure later on does not undo an earlier
//! store write.
//!
//! Lock and edit decisions are made by [`LockManager`] on the record as it was
//! read. The store only accepts the write if nobody saved the record in
//! between; otherwise the record is re-read and the decision made again, up to
//! [`MAX_WRITE_ATTEMPTS`] times.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::backend::contacts::clock::{Clock, SystemClock};
use crate::backend::contacts::lock::LockManager;
use crate::backend::contacts::store::{ContactFilter, ContactQuery, ContactSort, ContactStore};
use crate::backend::error::{BackendError, StoreError};
use crate::backend::realtime::NotificationBus;
use crate::shared::contact::{Contact, ContactDraft};
use crate::shared::pagination::{PageRequest, Pagination};
use crate::shared::validation::validate_contact;
use crate::shared::RealtimeEvent;

/// Fetch-decide-persist rounds before giving up on a contended record
pub const MAX_WRITE_ATTEMPTS: usize = 3;

/// Contacts per page when the client does not ask for a size
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// One page of a contact listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    pub pagination: Pagination,
}

#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
    locks: LockManager,
    bus: NotificationBus,
    clock: Arc<dyn Clock>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>, locks: LockManager, bus: NotificationBus) -> Self {
        Self {
            store,
            locks,
            bus,
            clock: Arc::new(SystemClock),
        }
    }

    /// Judge lock expiry against `clock` instead of wall time
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub fn locks(&self) -> &LockManager {
        &self.locks
    }

    /// Validate and persist a new contact, then announce it
    pub async fn create(&self, draft: &ContactDraft, principal: &str) -> Result<Contact, BackendError> {
        let fields = validate_contact(draft)?;
        let contact = self.store.create(fields, Some(principal.to_string())).await?;

        tracing::info!("[Contacts] {} created contact {}", principal, contact.id);
        self.bus.emit(RealtimeEvent::contact_added(&contact));
        Ok(contact)
    }

    pub async fn get(&self, id: Uuid) -> Result<Contact, BackendError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| BackendError::not_found("Contact"))
    }

    /// Newest-first page of contacts matching `filter`
    pub async fn list(&self, filter: ContactFilter, page: PageRequest) -> Result<ContactPage, BackendError> {
        let query = ContactQuery::new(filter)
            .sorted(ContactSort::NewestFirst)
            .page(page.skip(), page.limit);

        let contacts = self.store.find(&query).await?;
        let total = self.store.count(&query.filter).await?;

        Ok(ContactPage {
            contacts,
            pagination: page.paginate(total),
        })
    }

    /// Number of existing contacts created by `username`
    pub async fn count_created_by(&self, username: &str) -> Result<u64, BackendError> {
        Ok(self.store.count(&ContactFilter::created_by(username)).await?)
    }

    /// Acquire or refresh `principal`'s lock on a contact
    pub async fn lock(&self, id: Uuid, principal: &str) -> Result<Contact, BackendError> {
        let contact = self
            .mutate(id, |contact, now| {
                if self.locks.is_expired(contact, now) {
                    tracing::info!(
                        "[Contacts] Lock on {} by {:?} expired, taking over for {}",
                        contact.id,
                        contact.locked_by(),
                        principal
                    );
                }
                self.locks.acquire(contact, principal, now)?;
                Ok(())
            })
            .await
            .inspect_err(|err| {
                if let Some(holder) = err.locked_by() {
                    tracing::warn!("[Contacts] {} refused lock on {}, held by {}", principal, id, holder);
                }
            })?;

        tracing::info!("[Contacts] {} locked contact {}", principal, id);
        self.bus.emit(RealtimeEvent::contact_locked(contact.id, principal));
        Ok(contact)
    }

    /// Clear the lock on a contact, whoever holds it
    pub async fn unlock(&self, id: Uuid, principal: &str) -> Result<Contact, BackendError> {
        let mut previous = None;
        let contact = self
            .mutate(id, |contact, _| {
                previous = self.locks.release(contact);
                Ok(())
            })
            .await?;

        match previous {
            Some(lock) if lock.holder != principal => tracing::info!(
                "[Contacts] {} unlocked contact {} held by {}",
                principal,
                id,
                lock.holder
            ),
            _ => tracing::info!("[Contacts] {} unlocked contact {}", principal, id),
        }
        self.bus.emit(RealtimeEvent::contact_unlocked(contact.id));
        Ok(contact)
    }

    /// Replace a contact's fields and release the editor's lock
    pub async fn update(
        &self,
        id: Uuid,
        draft: &ContactDraft,
        principal: &str,
    ) -> Result<Contact, BackendError> {
        let contact = self
            .mutate(id, |contact, _| {
                self.locks.authorize_edit(contact, principal)?;
                let fields = validate_contact(draft)?;
                contact.apply_fields(fields);
                self.locks.release(contact);
                Ok(())
            })
            .await
            .inspect_err(|err| {
                if matches!(err, BackendError::Lock(_)) {
                    tracing::warn!("[Contacts] {} tried to edit {} without holding its lock", principal, id);
                }
            })?;

        tracing::info!("[Contacts] {} updated contact {}", principal, id);
        self.bus.emit(RealtimeEvent::contact_updated(&contact));
        self.bus.emit(RealtimeEvent::contact_unlocked(contact.id));
        Ok(contact)
    }

    pub async fn delete(&self, id: Uuid, principal: &str) -> Result<Contact, BackendError> {
        let contact = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| BackendError::not_found("Contact"))?;

        tracing::info!("[Contacts] {} deleted contact {}", principal, id);
        self.bus.emit(RealtimeEvent::contact_deleted(contact.id));
        Ok(contact)
    }

    /// Clear every lock that has outlived the TTL
    ///
    /// Records written concurrently are skipped and picked up by the next
    /// sweep. Returns the number of locks released.
    pub async fn release_expired_locks(&self) -> Result<usize, BackendError> {
        let now = self.clock.now();
        let cutoff = self.locks.expiry_cutoff(now);
        let expired = self
            .store
            .find(&ContactQuery::new(ContactFilter::locked_before(cutoff)).sorted(ContactSort::OldestFirst))
            .await?;

        let mut released = 0;
        for mut contact in expired {
            if !self.locks.is_expired(&contact, now) {
                continue;
            }
            let holder = self.locks.release(&mut contact);

            match self.store.save(&contact).await {
                Ok(saved) => {
                    released += 1;
                    tracing::info!(
                        "[Contacts] Released expired lock on {} held by {}",
                        saved.id,
                        holder.map(|lock| lock.holder).unwrap_or_default()
                    );
                    self.bus.emit(RealtimeEvent::contact_unlocked(saved.id));
                }
                Err(StoreError::StaleRevision { id }) | Err(StoreError::Missing { id }) => {
                    tracing::debug!("[Contacts] Skipping expired lock on {}, record changed", id);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(released)
    }

    /// Run [`Self::release_expired_locks`] every `every` until the runtime stops
    pub fn spawn_lock_reaper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tracing::info!("[Contacts] Expired lock reaper running every {:?}", every);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match self.release_expired_locks().await {
                    Ok(0) => {}
                    Ok(count) => tracing::info!("[Contacts] Reaper released {} locks", count),
                    Err(err) => tracing::error!("[Contacts] Reaper sweep failed: {}", err),
                }
            }
        })
    }

    /// Fetch a record, let `decide` change it, and save it revision-checked.
    async fn mutate<F>(&self, id: Uuid, mut decide: F) -> Result<Contact, BackendError>
    where
        F: FnMut(&mut Contact, DateTime<Utc>) -> Result<(), BackendError> + Send,
    {
        let mut attempt = 1;
        loop {
            let mut contact = self.get(id).await?;
            decide(&mut contact, self.clock.now())?;

            match self.store.save(&contact).await {
                Ok(saved) => return Ok(saved),
                Err(StoreError::StaleRevision { .. }) if attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::debug!("[Contacts] Contact {} changed underneath us, retry {}", id, attempt);
                    attempt += 1;
                }
                Err(StoreError::StaleRevision { .. }) => {
                    tracing::warn!("[Contacts] Gave up on contact {} after {} attempts", id, attempt);
                    return Err(BackendError::conflict(
                        "Contact was modified by another request, please retry",
                    ));
                }
                Err(StoreError::Missing { .. }) => return Err(BackendError::not_found("Contact")),
                Err(err) => return Err(err.into()),
            }
        }
    }
}
