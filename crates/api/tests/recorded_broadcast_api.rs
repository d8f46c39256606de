//! Integration tests for the `/v1/recordedbroadcast` resource and its
//! curriculum lookups.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, broadcast_form, delete, get, patch_multipart, post_multipart, MultipartForm,
    TEST_KEY_PREFIX,
};
use sqlx::PgPool;

const NO_MATCH_MESSAGE: &str = "no recorded broadcast found for the given parameters";

async fn create_broadcast(
    app: &common::TestApp,
    title: &str,
    book_id: &str,
    chapter_id: &str,
) -> serde_json::Value {
    let form = broadcast_form(title, book_id, chapter_id)
        .png("landscapeImage", "wide.png")
        .png("portraitImage", "tall.png");
    let response = post_multipart(app.router(), "/v1/recordedbroadcast", form).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_stores_both_images(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = create_broadcast(&app, "Newton's Laws", "book-1", "ch-1").await;

    assert_eq!(created["title"], "Newton's Laws");
    assert_eq!(created["type"], "lecture");
    assert_eq!(created["date"], "2023-01-01");
    assert_eq!(created["time"], "12:00 PM");
    assert_eq!(created["presenterName"], "Anil Sharma");

    let landscape = created["landscapeImage"].as_str().unwrap();
    let portrait = created["portraitImage"].as_str().unwrap();
    assert!(landscape.contains(&format!("/{TEST_KEY_PREFIX}/landscape/")));
    assert!(portrait.contains(&format!("/{TEST_KEY_PREFIX}/portrait/")));
    assert!(app.stored_path(landscape).exists());
    assert!(app.stored_path(portrait).exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_both_images(pool: PgPool) {
    let app = common::build_test_app(pool);
    let form = broadcast_form("Half", "book-1", "ch-1").png("landscapeImage", "wide.png");

    let response = post_multipart(app.router(), "/v1/recordedbroadcast", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["message"].as_str().unwrap().to_string();
    assert!(message.contains("portraitImage"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filter_by_class_and_subject(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_broadcast(&app, "One", "book-1", "ch-1").await;
    create_broadcast(&app, "Two", "book-1", "ch-2").await;

    let hits = body_json(get(app.router(), "/v1/recordedbroadcast/filter/class-10/physics").await).await;
    assert_eq!(hits.as_array().unwrap().len(), 2);

    let response = get(app.router(), "/v1/recordedbroadcast/filter/class-9/physics").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recorded_videos_are_grouped_by_chapter(pool: PgPool) {
    let app = common::build_test_app(pool);
    let a = create_broadcast(&app, "A", "book-1", "ch-1").await;
    let b = create_broadcast(&app, "B", "book-1", "ch-2").await;
    let c = create_broadcast(&app, "C", "book-1", "ch-1").await;
    create_broadcast(&app, "Other book", "book-2", "ch-1").await;

    let response = get(app.router(), "/v1/recordedbroadcast/getrecordedvideo/book-1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let chapters = json["chaptersData"].as_array().unwrap();
    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0]["chapterId"], "ch-1");
    let ids: Vec<_> = chapters[0]["recordedBroadcasts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].clone())
        .collect();
    assert_eq!(ids, vec![a["id"].clone(), c["id"].clone()]);
    assert_eq!(chapters[1]["chapterId"], "ch-2");
    assert_eq!(chapters[1]["recordedBroadcasts"][0]["id"], b["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recorded_videos_for_unknown_book_is_empty(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = body_json(get(app.router(), "/v1/recordedbroadcast/getrecordedvideo/book-404").await).await;

    assert!(json["chaptersData"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn composite_lookup_finds_single_broadcast(pool: PgPool) {
    let app = common::build_test_app(pool);
    let target = create_broadcast(&app, "Target", "book-1", "ch-3").await;
    create_broadcast(&app, "Other", "book-1", "ch-4").await;

    let response = get(
        app.router(),
        "/v1/recordedbroadcast/filterby/cbse/class-10/physics/english/ch-3/book-1",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], target["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn composite_lookup_without_match_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_broadcast(&app, "Target", "book-1", "ch-3").await;

    let response = get(
        app.router(),
        "/v1/recordedbroadcast/filterby/cbse/class-10/physics/hindi/ch-3/book-1",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], NO_MATCH_MESSAGE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_only_sent_image(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_broadcast(&app, "Before", "book-1", "ch-1").await;

    let response = patch_multipart(
        app.router(),
        &format!("/v1/recordedbroadcast/{}", created["id"]),
        MultipartForm::new()
            .text("title", "After")
            .png("portraitImage", "tall-2.png"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "After");
    assert_eq!(updated["landscapeImage"], created["landscapeImage"]);
    assert_ne!(updated["portraitImage"], created["portraitImage"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_title_and_delete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let keep = create_broadcast(&app, "Keep", "book-1", "ch-1").await;
    let drop = create_broadcast(&app, "Drop", "book-1", "ch-1").await;

    let uri = format!("/v1/recordedbroadcast/{}", drop["id"]);
    assert_eq!(delete(app.router(), &uri).await.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app.router(), "/v1/recordedbroadcast?title=Keep").await).await;
    assert_eq!(json["totalResults"], 1);
    assert_eq!(json["results"][0]["id"], keep["id"]);

    let all = body_json(get(app.router(), "/v1/recordedbroadcast").await).await;
    assert_eq!(all["totalResults"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_broadcast_returns_404_on_every_id_route(pool: PgPool) {
    let app = common::build_test_app(pool);
    let uri = "/v1/recordedbroadcast/8080";

    let read = get(app.router(), uri).await;
    assert_eq!(read.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(read).await["message"], "recorded broadcast not found");

    let update = patch_multipart(
        app.router(),
        uri,
        MultipartForm::new()
            .text("title", "Ghost")
            .png("landscapeImage", "wide.png"),
    )
    .await;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(update).await["code"], "NOT_FOUND");
    assert_eq!(app.stored_files(), 0);

    let removed = delete(app.router(), uri).await;
    assert_eq!(removed.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(removed).await["message"], "recorded broadcast not found");
}
