use lambda_http::{http::StatusCode, Body, Error, Response};

use crate::error::StoreError;

pub fn json(status: StatusCode, body: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(body.into())
        .map_err(Box::new)?)
}

pub fn error(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    json(
        status,
        serde_json::json!({ "error": message }).to_string(),
    )
}

/// Map a store failure onto the wire taxonomy: MissingOwner → 400,
/// NotFound → 404, backend faults → 500.
pub fn store_error(err: StoreError) -> Result<Response<Body>, Error> {
    match err {
        StoreError::MissingOwner => error(StatusCode::BAD_REQUEST, "User ID required"),
        StoreError::NotFound(resource) => {
            error(StatusCode::NOT_FOUND, &format!("{} not found", resource))
        }
        StoreError::Backend(message) => {
            tracing::error!("store backend failure: {}", message);
            error(StatusCode::INTERNAL_SERVER_ERROR, &message)
        }
    }
}
