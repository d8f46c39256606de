use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Tag for the health endpoint in the OpenAPI document.
pub static HEALTH_TAG: &str = "health";

/// Health check response payload.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Object store backend in use.
    pub storage: &'static str,
}

/// GET /health -- returns service and database health.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service status; `degraded` when the database is unreachable", body = HealthResponse)
    ),
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = lms_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage: state.object_store.backend(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
