/**
 * Contact Handlers
 *
 * HTTP handlers for `/api/contacts`. Every route sits behind
 * `auth_middleware`; the authenticated username is the principal recorded in
 * locks and `createdBy`.
 *
 * # Routes
 *
 * - `GET /api/contacts?page&limit&name&phone&address` - filtered listing
 * - `POST /api/contacts` - create (201)
 * - `GET /api/contacts/{id}` - fetch one
 * - `POST /api/contacts/{id}/lock` - take the edit lock
 * - `POST /api/contacts/{id}/unlock` - release the edit lock
 * - `PUT /api/contacts/{id}` - edit while holding the lock
 * - `DELETE /api/contacts/{id}` - remove
 *
 * Malformed ids are answered with 404, the same as ids that do not exist.
 */

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::backend::contacts::service::{ContactPage, ContactService, DEFAULT_PAGE_SIZE};
use crate::backend::contacts::store::ContactFilter;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::{Contact, ContactDraft, PageRequest};

#[derive(Debug, Default, Deserialize)]
pub struct ListContactsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Parse a path id, treating garbage as an unknown record
pub fn parse_id(raw: &str, resource: &'static str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw.trim()).map_err(|_| BackendError::not_found(resource))
}

/// List contacts (GET /api/contacts)
pub async fn list_contacts(
    State(contacts): State<Arc<ContactService>>,
    Query(query): Query<ListContactsQuery>,
) -> Result<Json<ContactPage>, BackendError> {
    let page = PageRequest::parse(query.page.as_deref(), query.limit.as_deref(), DEFAULT_PAGE_SIZE);
    let filter = ContactFilter::text(
        query.name.as_deref(),
        query.phone.as_deref(),
        query.address.as_deref(),
    );
    Ok(Json(contacts.list(filter, page).await?))
}

/// Create a contact (POST /api/contacts)
pub async fn create_contact(
    State(contacts): State<Arc<ContactService>>,
    AuthUser(principal): AuthUser,
    payload: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), BackendError> {
    let Json(draft) = payload?;
    let contact = contacts.create(&draft, &principal.username).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Fetch a contact (GET /api/contacts/{id})
pub async fn get_contact(
    State(contacts): State<Arc<ContactService>>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, BackendError> {
    let id = parse_id(&id, "Contact")?;
    Ok(Json(contacts.get(id).await?))
}

/// Lock a contact for editing (POST /api/contacts/{id}/lock)
///
/// # Errors
///
/// * `404 Not Found` - Unknown contact
/// * `423 Locked` - Held by someone else within the lock TTL; the body
///   carries `lockedBy`
pub async fn lock_contact(
    State(contacts): State<Arc<ContactService>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, BackendError> {
    let id = parse_id(&id, "Contact")?;
    let contact = contacts.lock(id, &principal.username).await?;
    Ok(Json(json!({ "message": "Contact locked successfully", "contact": contact })))
}

/// Unlock a contact (POST /api/contacts/{id}/unlock)
pub async fn unlock_contact(
    State(contacts): State<Arc<ContactService>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, BackendError> {
    let id = parse_id(&id, "Contact")?;
    let contact = contacts.unlock(id, &principal.username).await?;
    Ok(Json(json!({ "message": "Contact unlocked successfully", "contact": contact })))
}

/// Edit a contact (PUT /api/contacts/{id})
///
/// The caller must hold the contact's lock, which is released on success.
pub async fn update_contact(
    State(contacts): State<Arc<ContactService>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<ContactDraft>, JsonRejection>,
) -> Result<Json<Contact>, BackendError> {
    let id = parse_id(&id, "Contact")?;
    let Json(draft) = payload?;
    Ok(Json(contacts.update(id, &draft, &principal.username).await?))
}

/// Delete a contact (DELETE /api/contacts/{id})
pub async fn delete_contact(
    State(contacts): State<Arc<ContactService>>,
    AuthUser(principal): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, BackendError> {
    let id = parse_id(&id, "Contact")?;
    contacts.delete(id, &principal.username).await?;
    Ok(Json(json!({ "message": "Contact deleted successfully" })))
}
