/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check and realtime routes (public)
 * 2. API routes (auth, contacts, users)
 * 3. Fallback handler (JSON 404)
 *
 * CORS admits the configured frontend origin, and every request is logged
 * through `TraceLayer`.
 */

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::realtime::{handle_join_room, handle_realtime_subscription};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## Public Routes
///
/// - `GET /api/health` - Liveness check
/// - `GET /realtime` - Server-Sent Events subscription
/// - `POST /realtime/rooms` - Join a room
///
/// ## API Routes
///
/// See [`configure_api_routes`].
///
/// ## Fallback
///
/// Unknown routes return 404 `{"error": "Route not found"}`.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/api/health", get(health))
        .route("/realtime", get(handle_realtime_subscription))
        .route("/realtime/rooms", post(handle_join_room));

    let router = configure_api_routes(router, app_state.clone());

    let router = router.fallback(route_not_found);

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&app_state.config.frontend_url));

    router.layer(layers).with_state(app_state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "timestamp": Utc::now() }))
}

async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found", "status": StatusCode::NOT_FOUND.as_u16() })),
    )
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!("[Startup] FRONTEND_URL {:?} is not a valid origin, CORS disabled", frontend_url);
            cors
        }
    }
}
