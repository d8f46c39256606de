//! Request validation through the full router.
//!
//! Every request here is rejected before the service layer runs, so an
//! unreachable database pool is enough.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, book_form, get, patch_json, patch_multipart, post_json, post_multipart,
    MultipartForm,
};
use serde_json::json;

fn app() -> common::TestApp {
    common::build_test_app(common::unreachable_pool())
}

fn error_fields(json: &serde_json::Value) -> Vec<String> {
    json["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn blank_section_name_is_rejected() {
    let app = app();
    let response = post_json(app.router(), "/v1/section", json!({ "name": "   " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(error_fields(&json), vec!["name"]);
}

#[tokio::test]
async fn missing_field_is_a_body_violation() {
    let app = app();
    let response = post_json(app.router(), "/v1/section", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(error_fields(&json), vec!["body"]);
}

#[tokio::test]
async fn unknown_field_is_rejected() {
    let app = app();
    let response = post_json(
        app.router(),
        "/v1/section",
        json!({ "name": "A", "colour": "red" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let app = app();
    let response = patch_json(app.router(), "/v1/leavingcert/1", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(error_fields(&json), vec!["body"]);
}

#[tokio::test]
async fn malformed_date_is_rejected() {
    let app = app();
    let response = post_json(
        app.router(),
        "/v1/leavingcert",
        json!({ "applicantName": "Ravi", "date": "31/03/2024" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = app();
    for uri in ["/v1/book/abc", "/v1/section/0", "/v1/presentator/-4"] {
        let response = get(app.router(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(error_fields(&json), vec!["id"], "{uri}");
    }
}

#[tokio::test]
async fn malformed_reference_id_in_path_is_rejected() {
    let app = app();
    let response = get(app.router(), "/v1/book/filter/cbse/english/class%2010/physics").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(error_fields(&json), vec!["classId"]);
}

#[tokio::test]
async fn list_query_is_validated() {
    let app = app();

    let response = get(app.router(), "/v1/section?limit=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body_json(response).await), vec!["limit"]);

    let response = get(app.router(), "/v1/section?sortBy=password").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body_json(response).await), vec!["sortBy"]);

    let response = get(app.router(), "/v1/section?limit=ten").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body_json(response).await), vec!["query"]);
}

#[tokio::test]
async fn book_create_without_thumbnail_is_bad_request() {
    let app = app();
    let response = post_multipart(
        app.router(),
        "/v1/book",
        book_form("Physics I", "cbse", "physics"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].as_str().unwrap().contains("thumbnail"));
}

#[tokio::test]
async fn unsupported_image_format_is_bad_request() {
    let app = app();
    let form = book_form("Physics I", "cbse", "physics").file(
        "thumbnail",
        "cover.pdf",
        "application/pdf",
        b"%PDF-1.4",
    );

    let response = post_multipart(app.router(), "/v1/book", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn presentator_missing_text_field_is_validation_error() {
    let app = app();
    let form = MultipartForm::new()
        .text("presentatorName", "Anil Sharma")
        .png("photo", "anil.png");

    let response = post_multipart(app.router(), "/v1/presentator", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn multipart_update_without_fields_or_file_is_rejected() {
    let app = app();
    let response = patch_multipart(app.router(), "/v1/presentator/1", MultipartForm::new()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(error_fields(&json), vec!["body"]);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = app();
    let big = vec![0u8; 2 * 1024 * 1024];
    let form = book_form("Physics I", "cbse", "physics").file(
        "thumbnail",
        "cover.png",
        "image/png",
        &big,
    );

    let response = post_multipart(app.router(), "/v1/book", form).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn non_multipart_body_on_media_route_is_bad_request_envelope() {
    let app = app();

    for response in [
        patch_json(app.router(), "/v1/book/1", json!({ "title": "JSON" })).await,
        post_json(app.router(), "/v1/presentator", json!({ "presentatorName": "A" })).await,
        post_json(app.router(), "/v1/recordedbroadcast", json!({})).await,
    ] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}

#[tokio::test]
async fn invalid_text_fields_leave_no_upload_behind() {
    let app = app();

    let create = post_multipart(
        app.router(),
        "/v1/book",
        book_form("   ", "cbse", "physics").png("thumbnail", "cover.png"),
    )
    .await;
    assert_eq!(create.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body_json(create).await), vec!["title"]);

    let update = patch_multipart(
        app.router(),
        "/v1/presentator/1",
        MultipartForm::new()
            .text("presentatorName", "")
            .png("photo", "portrait.png"),
    )
    .await;
    assert_eq!(update.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(update).await["code"], "VALIDATION_ERROR");

    assert_eq!(app.stored_files(), 0);
}
