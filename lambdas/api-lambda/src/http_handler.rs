use focusmate_atoms::{agenda, respond, tasks};
use focusmate_shared::AppState;
use lambda_http::http::header::{HeaderValue, VARY};
use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, Response,
};
use std::sync::Arc;

/// Permissive CORS posture: reflect the caller's Origin (or `*` when absent),
/// allow credentials and everything the frontend sends. Prototype-grade on
/// purpose.
fn with_cors_headers(mut resp: Response<Body>, request_origin: Option<&str>) -> Response<Body> {
    let cors_origin = request_origin.unwrap_or("*");

    let headers = resp.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_str(cors_origin).unwrap_or_else(|_| HeaderValue::from_static("*")),
    );
    headers.insert(
        "Access-Control-Allow-Credentials",
        HeaderValue::from_static("true"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,POST,PUT,PATCH,DELETE,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type,X-User-Id"),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));

    resp
}

fn finalize_response(
    resp: Result<Response<Body>, Error>,
    request_origin: Option<&str>,
) -> Result<Response<Body>, Error> {
    resp.map(|r| with_cors_headers(r, request_origin))
}

fn not_found() -> Result<Response<Body>, Error> {
    respond::error(StatusCode::NOT_FOUND, "Not found")
}

fn method_not_allowed() -> Result<Response<Body>, Error> {
    respond::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Main handler: extracts the owner from the x-user-id header and routes to
/// the task or agenda endpoints. A missing header is "no owner", not a
/// rejection; the store decides which operations that is fatal for.
pub async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let body = event.body();
    let request_origin = event.headers().get("Origin").and_then(|v| v.to_str().ok());
    let user_id = event
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    tracing::info!("API invoked - Method: {} Path: {}", method, path);

    // CORS preflight
    if method == "OPTIONS" {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp, request_origin));
    }

    let store = state.store.as_ref();
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let resp = match (method, parts.as_slice()) {
        (&Method::GET, []) => respond::json(
            StatusCode::OK,
            serde_json::json!({"message": "Focus Mate API is running"}).to_string(),
        ),

        // --- TASKS ---
        (&Method::GET, ["tasks"]) => tasks::http::list_tasks(store, user_id).await,
        (&Method::POST, ["tasks"]) => tasks::http::create_task(store, user_id, body).await,
        (&Method::PUT, ["tasks", task_id]) => {
            tasks::http::replace_task(store, user_id, task_id, body).await
        }
        (&Method::DELETE, ["tasks", task_id]) => {
            tasks::http::delete_task(store, user_id, task_id).await
        }
        (_, ["tasks"]) | (_, ["tasks", _]) => method_not_allowed(),

        // --- AGENDA ---
        (&Method::GET, ["agenda"]) => agenda::http::list_agenda(store, user_id).await,
        (&Method::POST, ["agenda"]) => {
            agenda::http::create_agenda_item(store, user_id, body).await
        }
        (&Method::PUT, ["agenda", item_id]) => {
            agenda::http::replace_agenda_item(store, user_id, item_id, body).await
        }
        (&Method::DELETE, ["agenda", item_id]) => {
            agenda::http::delete_agenda_item(store, user_id, item_id).await
        }
        (_, ["agenda"]) | (_, ["agenda", _]) => method_not_allowed(),

        _ => not_found(),
    };

    finalize_response(resp, request_origin)
}
