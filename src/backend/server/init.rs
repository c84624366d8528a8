/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, account seeding and route configuration.
 *
 * # Initialization Process
 *
 * 1. Pick the record stores: PostgreSQL when `database_url` is set,
 *    in-memory maps otherwise
 * 2. Build the application state
 * 3. Seed the default accounts if enabled
 * 4. Start the expired-lock reaper if an interval is configured
 * 5. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::db::PgUserStore;
use crate::backend::auth::memory::MemoryUserStore;
use crate::backend::auth::users::{seed_default_users, UserStore};
use crate::backend::contacts::db::PgContactStore;
use crate::backend::contacts::memory::MemoryContactStore;
use crate::backend::contacts::store::ContactStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, StartupError};
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Build the application state for `config`
pub async fn create_state(config: AppConfig) -> Result<AppState, StartupError> {
    let (contacts, users): (Arc<dyn ContactStore>, Arc<dyn UserStore>) = match &config.database_url {
        Some(url) => {
            let pool = load_database(url).await?;
            (
                Arc::new(PgContactStore::new(pool.clone())),
                Arc::new(PgUserStore::new(pool)),
            )
        }
        None => {
            tracing::warn!("[Startup] DATABASE_URL not set. Records are kept in memory only.");
            (Arc::new(MemoryContactStore::new()), Arc::new(MemoryUserStore::new()))
        }
    };

    Ok(AppState::new(config, contacts, users))
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the configured database cannot be reached or the default
/// accounts cannot be written.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("[Startup] Initializing ContactHub backend server");

    let app_state = create_state(config).await?;

    if app_state.config.seed_default_users {
        let created = seed_default_users(app_state.users.as_ref(), app_state.config.bcrypt_cost).await?;
        tracing::info!("[Startup] Seeded {} default users", created);
    }

    if let Some(every) = app_state.config.lock_reaper_interval {
        app_state.contacts.clone().spawn_lock_reaper(every);
    }

    let app = create_router(app_state);
    tracing::info!("[Startup] Router configured");

    Ok(app)
}
