//! Panic rendering for `CatchPanicLayer`.

use std::any::Any;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;

use crate::error::{ErrorBody, INTERNAL_MESSAGE};

/// Turn a caught panic into a 500 with the standard error envelope.
///
/// The panic payload is logged, never returned.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response<String> {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    let body = serde_json::to_string(&ErrorBody::new("INTERNAL_ERROR", INTERNAL_MESSAGE))
        .unwrap_or_default();

    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
