/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central container shared by every handler:
 * - The contact service (stores, lock manager, notification bus)
 * - The user store and user administration service
 * - The token issuer for sessions
 * - The notification bus, for the realtime endpoints
 * - The loaded configuration
 *
 * Everything inside is cheap to clone (`Arc` or a channel handle).
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the part they
 * need, e.g. `State(bus): State<NotificationBus>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::memory::MemoryUserStore;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::UserStore;
use crate::backend::contacts::clock::{Clock, SystemClock};
use crate::backend::contacts::lock::LockManager;
use crate::backend::contacts::memory::MemoryContactStore;
use crate::backend::contacts::service::ContactService;
use crate::backend::contacts::store::ContactStore;
use crate::backend::realtime::NotificationBus;
use crate::backend::users::UserService;
use crate::shared::AppConfig;

#[derive(Clone)]
pub struct AppState {
    /// Contact operations and their notifications
    pub contacts: Arc<ContactService>,

    /// Account lookup for login and the auth middleware
    pub users: Arc<dyn UserStore>,

    /// Admin-only account management
    pub user_admin: Arc<UserService>,

    /// JWT signing and verification
    pub sessions: TokenIssuer,

    /// Realtime fan-out shared with the contact service
    pub bus: NotificationBus,

    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, contacts: Arc<dyn ContactStore>, users: Arc<dyn UserStore>) -> Self {
        Self::with_clock(config, contacts, users, Arc::new(SystemClock))
    }

    /// Build state whose lock decisions read time from `clock`
    pub fn with_clock(
        config: AppConfig,
        contacts: Arc<dyn ContactStore>,
        users: Arc<dyn UserStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let bus = NotificationBus::new(config.broadcast_capacity);
        let contact_service = Arc::new(
            ContactService::new(contacts, LockManager::new(config.lock_ttl), bus.clone())
                .with_clock(clock),
        );
        let user_admin = Arc::new(UserService::new(
            users.clone(),
            contact_service.clone(),
            config.bcrypt_cost,
        ));

        Self {
            contacts: contact_service,
            users,
            user_admin,
            sessions: TokenIssuer::from_config(&config),
            bus,
            config: Arc::new(config),
        }
    }

    /// State backed by in-memory stores
    pub fn in_memory(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let contacts = Arc::new(MemoryContactStore::with_clock(clock.clone()));
        let users = Arc::new(MemoryUserStore::new());
        Self::with_clock(config, contacts, users, clock)
    }
}

impl FromRef<AppState> for Arc<ContactService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.contacts.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_admin.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

/// Lets the realtime handlers take `State<NotificationBus>`
impl FromRef<AppState> for NotificationBus {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.bus.clone()
    }
}
