use lambda_http::{http::StatusCode, Body, Error, Response};

use super::model::AgendaItemPayload;
use crate::respond;
use crate::store::TaskStore;

/// GET /agenda — the caller's agenda; empty array when no owner header.
pub async fn list_agenda(store: &dyn TaskStore, user_id: &str) -> Result<Response<Body>, Error> {
    match store.list_agenda(user_id).await {
        Ok(items) => respond::json(StatusCode::OK, serde_json::to_string(&items)?),
        Err(e) => respond::store_error(e),
    }
}

/// POST /agenda — 400 without an owner header.
pub async fn create_agenda_item(
    store: &dyn TaskStore,
    user_id: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: AgendaItemPayload = serde_json::from_slice(body)?;
    match store.create_agenda_item(user_id, payload).await {
        Ok(item) => respond::json(StatusCode::CREATED, serde_json::to_string(&item)?),
        Err(e) => respond::store_error(e),
    }
}

/// PUT /agenda/{id} — whole-record replacement, 404 when nothing matches.
pub async fn replace_agenda_item(
    store: &dyn TaskStore,
    user_id: &str,
    item_id: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: AgendaItemPayload = serde_json::from_slice(body)?;
    match store.replace_agenda_item(user_id, item_id, payload).await {
        Ok(item) => respond::json(StatusCode::OK, serde_json::to_string(&item)?),
        Err(e) => respond::store_error(e),
    }
}

/// DELETE /agenda/{id} — 404 when nothing matches.
pub async fn delete_agenda_item(
    store: &dyn TaskStore,
    user_id: &str,
    item_id: &str,
) -> Result<Response<Body>, Error> {
    match store.delete_agenda_item(user_id, item_id).await {
        Ok(()) => respond::json(
            StatusCode::OK,
            serde_json::json!({"message": "Agenda item deleted"}).to_string(),
        ),
        Err(e) => respond::store_error(e),
    }
}
