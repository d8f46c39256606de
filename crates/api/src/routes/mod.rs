pub mod book;
pub mod health;
pub mod leaving_cert;
pub mod presentator;
pub mod recorded_broadcast;
pub mod section;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /book                                              list, create
/// /book/{id}                                         get, update, delete
/// /book/subject/{subject_id}                         oldest book for subject
/// /book/filter/{board}/{medium}/{class}/{subject}    oldest matching book
///
/// /presentator                                       list, create
/// /presentator/{id}                                  get, update, delete
///
/// /recordedbroadcast                                 list, create
/// /recordedbroadcast/{id}                            get, update, delete
/// /recordedbroadcast/filter/{class}/{subject}        list for class + subject
/// /recordedbroadcast/getrecordedvideo/{book}         grouped by chapter
/// /recordedbroadcast/filterby/{board}/{class}/{subject}/{medium}/{chapter}/{book}
///                                                    single composite match
///
/// /section                                           list, create
/// /section/{id}                                      get, update, delete
///
/// /leavingcert                                       list, create
/// /leavingcert/{id}                                  get, update, delete
/// ```
///
/// Swagger UI (`/v1/docs`) is merged separately in the router builder.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/book", book::router())
        .nest("/presentator", presentator::router())
        .nest("/recordedbroadcast", recorded_broadcast::router())
        .nest("/section", section::router())
        .nest("/leavingcert", leaving_cert::router())
}
