/**
 * Real-time Subscription Handlers
 *
 * Implements the Server-Sent Events stream on `/realtime` and the room join
 * endpoint on `/realtime/rooms`.
 *
 * # Stream
 *
 * The first event on every stream is `connected`, carrying the connection id
 * the client needs to join rooms later. Every bus event follows with its kind
 * as the SSE event name and the JSON event as data.
 *
 * # Query Parameters
 *
 * - `types` - comma-separated event kinds, e.g.
 *   `?types=contactLocked,contactUnlocked`. Unknown names are ignored. No
 *   parameter subscribes to everything.
 * - `room` - join a room as soon as the stream opens
 *
 * # Connection Management
 *
 * Keep-alive comments are injected by axum. Lagging connections skip what
 * they missed instead of being dropped. When the client goes away the
 * stream is dropped and the connection's rooms with it.
 */

use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream::{self, StreamExt};
use tokio_stream::Stream;
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::realtime::broadcast::{NotificationBus, Subscription};
use crate::shared::{EventType, SharedError};

#[derive(Debug, Default, Deserialize)]
pub struct RealtimeQuery {
    pub types: Option<String>,
    pub room: Option<String>,
}

/// Parse a `types` list, returning `None` when nothing usable was given
pub fn parse_type_filter(types: Option<&str>) -> Option<HashSet<EventType>> {
    types
        .map(|list| list.split(',').filter_map(EventType::parse).collect::<HashSet<_>>())
        .filter(|kinds| !kinds.is_empty())
}

/// Handle real-time subscription (GET /realtime)
pub async fn handle_realtime_subscription(
    State(bus): State<NotificationBus>,
    Query(query): Query<RealtimeQuery>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let subscription = bus.subscribe();
    let connection_id = subscription.id();

    if let Some(room) = query.room.as_deref().map(str::trim).filter(|room| !room.is_empty()) {
        bus.join_group(connection_id, room);
    }

    let filter = parse_type_filter(query.types.as_deref());
    match &filter {
        Some(kinds) => tracing::info!("[Realtime] Connection {} filtering {:?}", connection_id, kinds),
        None => tracing::info!("[Realtime] Connection {} subscribed to all events", connection_id),
    }

    let connected = Event::default()
        .event("connected")
        .json_data(serde_json::json!({ "connectionId": connection_id }));

    Sse::new(stream::once(async move { connected }).chain(event_stream(subscription, filter)))
        .keep_alive(KeepAlive::default())
}

fn event_stream(
    subscription: Subscription,
    filter: Option<HashSet<EventType>>,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold((subscription, filter), |(mut subscription, filter)| async move {
        loop {
            let event = subscription.recv().await?;
            if filter.as_ref().is_some_and(|kinds| !kinds.contains(&event.event_type)) {
                continue;
            }

            let sse_event = Event::default()
                .event(event.event_type.as_str())
                .json_data(&event);
            return Some((sse_event, (subscription, filter)));
        }
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub connection_id: Uuid,
    #[serde(default)]
    pub room: String,
}

/// Handle room join (POST /realtime/rooms)
pub async fn handle_join_room(
    State(bus): State<NotificationBus>,
    payload: Result<Json<JoinRoomRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let Json(request) = payload?;
    let room = request.room.trim();
    if room.is_empty() {
        return Err(SharedError::validation("room", "Room name is required").into());
    }

    if !bus.join_group(request.connection_id, room) {
        return Err(BackendError::not_found("Connection"));
    }

    Ok(Json(serde_json::json!({
        "message": "Joined room",
        "connectionId": request.connection_id,
        "room": room,
    })))
}
