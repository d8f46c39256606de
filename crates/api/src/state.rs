use std::sync::Arc;

use lms_cloud::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lms_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Destination for uploaded media.
    pub object_store: Arc<dyn ObjectStore>,
}
