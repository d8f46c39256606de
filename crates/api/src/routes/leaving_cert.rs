use axum::routing::get;
use axum::Router;

use crate::handlers::leaving_cert;
use crate::state::AppState;

/// Leaving certificate routes mounted at `/leavingcert`.
///
/// ```text
/// GET    /          -> list_leaving_certs
/// POST   /          -> create_leaving_cert (JSON)
/// GET    /{id}      -> get_leaving_cert
/// PATCH  /{id}      -> update_leaving_cert (JSON)
/// DELETE /{id}      -> delete_leaving_cert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(leaving_cert::list_leaving_certs).post(leaving_cert::create_leaving_cert),
        )
        .route(
            "/{id}",
            get(leaving_cert::get_leaving_cert)
                .patch(leaving_cert::update_leaving_cert)
                .delete(leaving_cert::delete_leaving_cert),
        )
}
