use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Build the uniform error response: `<status> {"error": "<message>"}`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, axum::Json(body)).into_response()
}

/// Router fallback for unmatched routes.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Panic handler for `CatchPanicLayer`: logs the payload and answers with a
/// generic 500 instead of dropping the connection.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, kind = "INTERNAL", "handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}
