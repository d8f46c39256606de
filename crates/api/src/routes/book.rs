use axum::routing::get;
use axum::Router;

use crate::handlers::book;
use crate::state::AppState;

/// Book routes mounted at `/book`.
///
/// ```text
/// GET    /                                                     -> list_books
/// POST   /                                                     -> create_book (multipart)
/// GET    /subject/{subject_id}                                 -> get_book_by_subject
/// GET    /filter/{board_id}/{medium_id}/{class_id}/{subject_id} -> get_book_by_filter
/// GET    /{id}                                                 -> get_book
/// PATCH  /{id}                                                 -> update_book (multipart)
/// DELETE /{id}                                                 -> delete_book
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(book::list_books).post(book::create_book))
        .route("/subject/{subject_id}", get(book::get_book_by_subject))
        .route(
            "/filter/{board_id}/{medium_id}/{class_id}/{subject_id}",
            get(book::get_book_by_filter),
        )
        .route(
            "/{id}",
            get(book::get_book)
                .patch(book::update_book)
                .delete(book::delete_book),
        )
}
