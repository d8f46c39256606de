use axum::routing::get;
use axum::Router;

use crate::handlers::presentator;
use crate::state::AppState;

/// Presentator routes mounted at `/presentator`.
///
/// ```text
/// GET    /          -> list_presentators
/// POST   /          -> create_presentator (multipart, `photo` required)
/// GET    /{id}      -> get_presentator
/// PATCH  /{id}      -> update_presentator (multipart, `photo` optional)
/// DELETE /{id}      -> delete_presentator
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(presentator::list_presentators).post(presentator::create_presentator),
        )
        .route(
            "/{id}",
            get(presentator::get_presentator)
                .patch(presentator::update_presentator)
                .delete(presentator::delete_presentator),
        )
}
