//! Contacts Module
//!
//! Shared contact list with optimistic record locking.
//!
//! # Architecture
//!
//! - **`clock`** - Time source for lock decisions
//! - **`lock`** - `LockManager`: acquire, release and edit checks on a record
//! - **`store`** - `ContactStore` trait, filters and queries
//! - **`memory`** - In-memory store
//! - **`db`** - PostgreSQL store
//! - **`service`** - `ContactService`: fetch, decide, persist, notify
//! - **`handlers`** - HTTP handlers
//!
//! # Module Structure
//!
//! ```text
//! contacts/
//! ├── mod.rs       - Module exports and documentation
//! ├── clock.rs     - Clock trait, system and manual clocks
//! ├── lock.rs      - Lock rules
//! ├── store.rs     - Store trait
//! ├── memory.rs    - In-memory store
//! ├── db.rs        - PostgreSQL store
//! ├── service.rs   - Contact operations
//! └── handlers.rs  - HTTP handlers
//! ```
//!
//! # Locking
//!
//! A lock is a `(holder, acquired_at)` pair stored on the record. It expires
//! five minutes after it was taken; expiry is evaluated when someone else
//! asks for the lock, so nothing needs to run for a stale lock to become
//! available. An optional background reaper clears expired locks so that
//! listings reflect them too.

pub mod clock;

pub mod lock;

pub mod store;

pub mod memory;

pub mod db;

pub mod service;

pub mod handlers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use lock::{LockError, LockManager};
pub use memory::MemoryContactStore;
pub use db::PgContactStore;
pub use service::{ContactPage, ContactService};
pub use store::{ContactFilter, ContactQuery, ContactSort, ContactStore};
