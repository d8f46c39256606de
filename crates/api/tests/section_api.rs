//! Integration tests for the `/v1/section` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json};
use serde_json::json;
use sqlx::PgPool;

async fn create_section(app: &common::TestApp, name: &str) -> serde_json::Value {
    let response = post_json(app.router(), "/v1/section", json!({ "name": name })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_get_returns_equal_record(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = create_section(&app, "Section A").await;
    assert_eq!(created["name"], "Section A");
    assert!(created["id"].as_i64().unwrap() > 0);
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let id = created["id"].as_i64().unwrap();
    let response = get(app.router(), &format!("/v1/section/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_section_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/v1/section/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "section not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_changes_only_supplied_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_section(&app, "Before").await;
    let id = created["id"].as_i64().unwrap();

    let response = patch_json(
        app.router(),
        &format!("/v1/section/{id}"),
        json!({ "name": "After" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "After");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_unknown_section_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = patch_json(app.router(), "/v1/section/424242", json!({ "name": "x" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_twice_returns_204_then_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_section(&app, "Doomed").await;
    let uri = format!("/v1/section/{}", created["id"]);

    let first = delete(app.router(), &uri).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(common::body_bytes(first).await.is_empty());

    let second = delete(app.router(), &uri).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(second).await["message"], "section not found");

    let after = get(app.router(), &uri).await;
    assert_eq!(after.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_exact_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    for name in ["Alpha", "Beta", "Alpha"] {
        create_section(&app, name).await;
    }

    let response = get(app.router(), "/v1/section?name=Alpha").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["totalResults"], 2);
    let results = json["results"].as_array().unwrap();
    assert!(results.iter().all(|s| s["name"] == "Alpha"));
}
