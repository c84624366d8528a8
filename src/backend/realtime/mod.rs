//! Real-time Update Module
//!
//! Pushes contact changes to connected clients as they are committed.
//!
//! # Architecture
//!
//! - **`broadcast`** - The `NotificationBus`: fan-out channel and room registry
//! - **`subscription`** - Server-Sent Events stream and room join handlers
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Notification bus
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! # Real-time System
//!
//! Server-Sent Events give one-way delivery from server to client, which is
//! all a change feed needs. Clients act on events by calling the REST API.
//!
//! # Event Types
//!
//! - `contactAdded` / `contactUpdated` - carry the full contact
//! - `contactLocked` - carries `{contactId, lockedBy}`
//! - `contactUnlocked` / `contactDeleted` - carry `{contactId}`
//!
//! # Example
//!
//! ```rust,no_run
//! use contacthub::backend::realtime::NotificationBus;
//! use contacthub::shared::RealtimeEvent;
//!
//! # async fn example() {
//! let bus = NotificationBus::new(1000);
//! let mut subscription = bus.subscribe();
//!
//! bus.emit(RealtimeEvent::contact_deleted(uuid::Uuid::new_v4()));
//! let event = subscription.recv().await;
//! # }
//! ```

/// Event broadcasting
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{NotificationBus, Subscription};
pub use subscription::{handle_join_room, handle_realtime_subscription};
