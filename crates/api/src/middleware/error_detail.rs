//! Development-only error detail on 500 responses.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::CONTENT_LENGTH;
use axum::middleware::Next;
use axum::response::Response;

use crate::config::Environment;
use crate::error::ErrorDetail;

/// Error bodies are small; anything larger is passed through untouched.
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

/// Move the [`ErrorDetail`] extension of a response into its JSON body as
/// `"detail"` when `environment` exposes detail. The extension is always
/// stripped.
pub async fn expose_error_detail(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetail(detail)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };
    if !environment.exposes_error_detail() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Could not buffer error body to attach detail");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let mut json: serde_json::Value = match serde_json::from_slice(&bytes) {
        Ok(json) => json,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };
    if let Some(object) = json.as_object_mut() {
        object.insert("detail".to_string(), serde_json::Value::String(detail));
    }

    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(json.to_string()))
}
