use axum::routing::get;
use axum::Router;

use crate::handlers::section;
use crate::state::AppState;

/// Section routes mounted at `/section`.
///
/// ```text
/// GET    /          -> list_sections
/// POST   /          -> create_section (JSON)
/// GET    /{id}      -> get_section
/// PATCH  /{id}      -> update_section (JSON)
/// DELETE /{id}      -> delete_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(section::list_sections).post(section::create_section),
        )
        .route(
            "/{id}",
            get(section::get_section)
                .patch(section::update_section)
                .delete(section::delete_section),
        )
}
