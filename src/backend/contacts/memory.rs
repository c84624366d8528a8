/**
 * In-Memory Contact Store
 *
 * Keeps contacts in a map behind a tokio `RwLock`. Used when no database URL
 * is configured and by the test suites. The revision check in `save` runs
 * under the write lock, so it is atomic with the write.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::contacts::clock::{Clock, SystemClock};
use crate::backend::contacts::store::{ContactFilter, ContactQuery, ContactSort, ContactStore};
use crate::backend::error::StoreError;
use crate::shared::contact::{Contact, ContactFields};

#[derive(Clone)]
pub struct MemoryContactStore {
    records: Arc<RwLock<HashMap<Uuid, Contact>>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Stamp `created_at`/`updated_at` from the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn find(&self, query: &ContactQuery) -> Result<Vec<Contact>, StoreError> {
        let records = self.records.read().await;
        let mut matching: Vec<Contact> = records
            .values()
            .filter(|contact| query.filter.matches(contact))
            .cloned()
            .collect();

        matching.sort_by(|a, b| match query.sort {
            ContactSort::NewestFirst => b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)),
            ContactSort::OldestFirst => a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)),
        });

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, filter: &ContactFilter) -> Result<u64, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().filter(|contact| filter.matches(contact)).count() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn create(
        &self,
        fields: ContactFields,
        created_by: Option<String>,
    ) -> Result<Contact, StoreError> {
        let contact = Contact::new(fields, created_by, self.clock.now());
        self.records.write().await.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn save(&self, contact: &Contact) -> Result<Contact, StoreError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&contact.id)
            .ok_or(StoreError::Missing { id: contact.id })?;

        if stored.revision != contact.revision {
            return Err(StoreError::StaleRevision { id: contact.id });
        }

        let mut updated = contact.clone();
        updated.revision += 1;
        updated.updated_at = self.clock.now();
        updated.created_at = stored.created_at;
        updated.created_by = stored.created_by.clone();
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Contact>, StoreError> {
        Ok(self.records.write().await.remove(&id))
    }
}
