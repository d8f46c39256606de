use axum::routing::get;
use axum::Router;

use crate::handlers::recorded_broadcast as broadcast;
use crate::state::AppState;

/// Recorded broadcast routes mounted at `/recordedbroadcast`.
///
/// ```text
/// GET    /                                      -> list_recorded_broadcasts
/// POST   /                                      -> create_recorded_broadcast (multipart)
/// GET    /filter/{class_id}/{subject_id}        -> list_by_class_subject
/// GET    /getrecordedvideo/{book_id}            -> chapters_for_book
/// GET    /filterby/{board_id}/{class_id}/{subject_id}/{medium_id}/{chapter_id}/{book_id}
///                                               -> find_by_composite
/// GET    /{id}                                  -> get_recorded_broadcast
/// PATCH  /{id}                                  -> update_recorded_broadcast (multipart)
/// DELETE /{id}                                  -> delete_recorded_broadcast
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(broadcast::list_recorded_broadcasts).post(broadcast::create_recorded_broadcast),
        )
        .route(
            "/filter/{class_id}/{subject_id}",
            get(broadcast::list_by_class_subject),
        )
        .route(
            "/getrecordedvideo/{book_id}",
            get(broadcast::chapters_for_book),
        )
        .route(
            "/filterby/{board_id}/{class_id}/{subject_id}/{medium_id}/{chapter_id}/{book_id}",
            get(broadcast::find_by_composite),
        )
        .route(
            "/{id}",
            get(broadcast::get_recorded_broadcast)
                .patch(broadcast::update_recorded_broadcast)
                .delete(broadcast::delete_recorded_broadcast),
        )
}
