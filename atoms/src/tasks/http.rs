use lambda_http::{http::StatusCode, Body, Error, Response};

use super::model::TaskPayload;
use crate::respond;
use crate::store::TaskStore;

/// GET /tasks — all of the caller's tasks; empty array when no owner header.
pub async fn list_tasks(store: &dyn TaskStore, user_id: &str) -> Result<Response<Body>, Error> {
    match store.list_tasks(user_id).await {
        Ok(tasks) => respond::json(StatusCode::OK, serde_json::to_string(&tasks)?),
        Err(e) => respond::store_error(e),
    }
}

/// POST /tasks — create under the caller's owner id; 400 without one.
pub async fn create_task(
    store: &dyn TaskStore,
    user_id: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: TaskPayload = serde_json::from_slice(body)?;
    match store.create_task(user_id, payload).await {
        Ok(task) => respond::json(StatusCode::CREATED, serde_json::to_string(&task)?),
        Err(e) => respond::store_error(e),
    }
}

/// PUT /tasks/{id} — whole-record replacement; 404 when {id, owner} matches
/// nothing.
pub async fn replace_task(
    store: &dyn TaskStore,
    user_id: &str,
    task_id: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: TaskPayload = serde_json::from_slice(body)?;
    match store.replace_task(user_id, task_id, payload).await {
        Ok(task) => respond::json(StatusCode::OK, serde_json::to_string(&task)?),
        Err(e) => respond::store_error(e),
    }
}

/// DELETE /tasks/{id} — 404 when {id, owner} matches nothing.
pub async fn delete_task(
    store: &dyn TaskStore,
    user_id: &str,
    task_id: &str,
) -> Result<Response<Body>, Error> {
    match store.delete_task(user_id, task_id).await {
        Ok(()) => respond::json(
            StatusCode::OK,
            serde_json::json!({"message": "Task deleted"}).to_string(),
        ),
        Err(e) => respond::store_error(e),
    }
}
