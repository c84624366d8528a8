/**
 * Notification Bus
 *
 * Fans realtime events out to every connected subscriber. Events go through a
 * single `tokio::sync::broadcast` channel, so each subscriber sees them in
 * emission order. Delivery is fire-and-forget: nothing is stored and a
 * subscriber that falls behind skips what it missed.
 *
 * # Rooms
 *
 * Every subscription gets a connection id. A connection can join named rooms.
 * Events without a room reach every subscriber; events addressed to a room only
 * reach connections that joined it. Dropping a `Subscription` removes its
 * memberships.
 */

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use uuid::Uuid;

use crate::shared::config::DEFAULT_BROADCAST_CAPACITY;
use crate::shared::RealtimeEvent;

type RoomRegistry = Arc<Mutex<HashMap<Uuid, HashSet<String>>>>;

fn registry(rooms: &RoomRegistry) -> MutexGuard<'_, HashMap<Uuid, HashSet<String>>> {
    rooms.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Process-wide event fan-out, shared through `AppState`
#[derive(Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<RealtimeEvent>,
    rooms: RoomRegistry,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}

impl NotificationBus {
    /// Create a bus buffering up to `capacity` events per slow subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Broadcast an event to all subscribers
    ///
    /// Never fails. Returns the number of subscribers the event was handed to,
    /// zero when nobody is listening.
    pub fn emit(&self, event: RealtimeEvent) -> usize {
        let event_name = event.event_type.as_str();
        match self.tx.send(event) {
            Ok(subscriber_count) => {
                tracing::debug!(
                    "[Realtime] {} broadcast to {} subscribers",
                    event_name,
                    subscriber_count
                );
                subscriber_count
            }
            Err(_) => {
                tracing::debug!("[Realtime] No subscribers to receive {}", event_name);
                0
            }
        }
    }

    /// Open a new subscription with a fresh connection id
    pub fn subscribe(&self) -> Subscription {
        let id = Uuid::new_v4();
        registry(&self.rooms).insert(id, HashSet::new());
        tracing::info!("[Realtime] Connection {} subscribed", id);

        Subscription {
            id,
            rx: self.tx.subscribe(),
            rooms: Arc::clone(&self.rooms),
        }
    }

    /// Add `room` to a live connection's memberships
    ///
    /// Returns false if the connection is unknown or already closed.
    pub fn join_group(&self, connection_id: Uuid, room: impl Into<String>) -> bool {
        let room = room.into();
        match registry(&self.rooms).get_mut(&connection_id) {
            Some(joined) => {
                tracing::info!("[Realtime] Connection {} joined room {}", connection_id, room);
                joined.insert(room);
                true
            }
            None => {
                tracing::warn!("[Realtime] Join for unknown connection {}", connection_id);
                false
            }
        }
    }

    /// Rooms joined by a connection
    pub fn rooms_of(&self, connection_id: Uuid) -> Option<HashSet<String>> {
        registry(&self.rooms).get(&connection_id).cloned()
    }

    /// Number of open subscriptions
    pub fn connection_count(&self) -> usize {
        registry(&self.rooms).len()
    }
}

/// A subscriber's view of the bus
pub struct Subscription {
    id: Uuid,
    rx: broadcast::Receiver<RealtimeEvent>,
    rooms: RoomRegistry,
}

impl Subscription {
    /// Connection id used for room membership
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether this connection should see `event`
    pub fn accepts(&self, event: &RealtimeEvent) -> bool {
        match &event.room {
            None => true,
            Some(room) => registry(&self.rooms)
                .get(&self.id)
                .is_some_and(|joined| joined.contains(room)),
        }
    }

    /// Wait for the next event addressed to this connection
    ///
    /// Returns `None` once the bus has been dropped.
    pub async fn recv(&mut self) -> Option<RealtimeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[Realtime] Connection {} lagged, skipped {} events",
                        self.id,
                        skipped
                    );
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("[Realtime] Bus closed for connection {}", self.id);
                    return None;
                }
            }
        }
    }

    /// Take the next already-delivered event without waiting
    pub fn try_recv(&mut self) -> Option<RealtimeEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if self.accepts(&event) => return Some(event),
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        registry(&self.rooms).remove(&self.id);
        tracing::info!("[Realtime] Connection {} closed", self.id);
    }
}
