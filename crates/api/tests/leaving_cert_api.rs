//! Integration tests for the `/v1/leavingcert` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_defaults_to_active(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/v1/leavingcert",
        json!({ "applicantName": "Ravi Kumar", "studioId": null }),
    )
    .await;
    // Unknown fields are rejected outright.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.router(),
        "/v1/leavingcert",
        json!({ "applicantName": "Ravi Kumar" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cert = body_json(response).await;
    assert_eq!(cert["applicantName"], "Ravi Kumar");
    assert_eq!(cert["status"], true);
    assert!(cert["studentId"].is_null());
    assert!(cert["date"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn date_round_trips_as_iso_date(pool: PgPool) {
    let app = common::build_test_app(pool);

    let cert = body_json(
        post_json(
            app.router(),
            "/v1/leavingcert",
            json!({
                "applicantName": "Priya Nair",
                "studentId": "STU-0042",
                "date": "2024-03-31",
                "status": false,
            }),
        )
        .await,
    )
    .await;

    assert_eq!(cert["date"], "2024-03-31");
    assert_eq!(cert["studentId"], "STU-0042");
    assert_eq!(cert["status"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    for (name, status) in [("A", true), ("B", false), ("C", true)] {
        let response = post_json(
            app.router(),
            "/v1/leavingcert",
            json!({ "applicantName": name, "status": status }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app.router(), "/v1/leavingcert?status=false").await).await;

    assert_eq!(json["totalResults"], 1);
    assert_eq!(json["results"][0]["applicantName"], "B");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_revokes_certificate(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cert = body_json(
        post_json(
            app.router(),
            "/v1/leavingcert",
            json!({ "applicantName": "Ravi Kumar" }),
        )
        .await,
    )
    .await;

    let response = patch_json(
        app.router(),
        &format!("/v1/leavingcert/{}", cert["id"]),
        json!({ "status": false }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], false);
    assert_eq!(updated["applicantName"], "Ravi Kumar");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_certificate_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/v1/leavingcert/77").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "leaving certificate not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_with_null_clears_nullable_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cert = body_json(
        post_json(
            app.router(),
            "/v1/leavingcert",
            json!({ "applicantName": "Priya Nair", "studentId": "STU-9", "date": "2024-03-31" }),
        )
        .await,
    )
    .await;
    let uri = format!("/v1/leavingcert/{}", cert["id"]);

    let response = patch_json(app.router(), &uri, json!({ "studentId": null })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert!(updated["studentId"].is_null());
    assert_eq!(updated["date"], "2024-03-31");

    let updated = body_json(patch_json(app.router(), &uri, json!({ "date": null })).await).await;
    assert!(updated["date"].is_null());
    assert_eq!(updated["applicantName"], "Priya Nair");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_twice_returns_204_then_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let cert = body_json(
        post_json(
            app.router(),
            "/v1/leavingcert",
            json!({ "applicantName": "Ravi Kumar" }),
        )
        .await,
    )
    .await;
    let uri = format!("/v1/leavingcert/{}", cert["id"]);

    let first = delete(app.router(), &uri).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(common::body_bytes(first).await.is_empty());

    let second = delete(app.router(), &uri).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(second).await["message"], "leaving certificate not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_unknown_certificate_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = patch_json(app.router(), "/v1/leavingcert/4040", json!({ "status": false })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "leaving certificate not found");
}
