//! OpenAPI document for the `/v1` API, served with Swagger UI.
//!
//! Multipart endpoints are described by the `*Form` schemas below. They only
//! exist for documentation; handlers read the parts through
//! [`UploadForm`](crate::upload::UploadForm).

use lms_core::error::FieldViolation;
use lms_db::models::book::Book;
use lms_db::models::leaving_cert::{CreateLeavingCert, LeavingCert, UpdateLeavingCert};
use lms_db::models::presentator::Presentator;
use lms_db::models::recorded_broadcast::{ChapterBroadcasts, RecordedBroadcast};
use lms_db::models::section::{CreateSection, Section, UpdateSection};
use utoipa::{OpenApi, ToSchema};

use crate::error::ErrorBody;
use crate::handlers::{book, leaving_cert, presentator, recorded_broadcast, section};
use crate::routes::health;

/// Where Swagger UI is mounted.
pub const DOCS_PATH: &str = "/v1/docs";

/// Where the raw OpenAPI JSON is served.
pub const OPENAPI_JSON_PATH: &str = "/v1/docs/openapi.json";

/// `multipart/form-data` body of `POST /v1/book`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BookForm {
    pub title: String,
    pub board_id: String,
    pub medium_id: String,
    pub class_id: String,
    pub subject_id: String,
    /// Cover image (png, jpeg, gif or webp).
    #[schema(value_type = String, format = Binary)]
    pub thumbnail: Vec<u8>,
}

/// `multipart/form-data` body of `PATCH /v1/book/{id}`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BookPatchForm {
    pub title: Option<String>,
    pub board_id: Option<String>,
    pub medium_id: Option<String>,
    pub class_id: Option<String>,
    pub subject_id: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub thumbnail: Option<Vec<u8>>,
}

/// `multipart/form-data` body of `POST /v1/presentator`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PresentatorForm {
    pub presentator_name: String,
    pub presentator_type: String,
    pub presentator_bio: String,
    #[schema(value_type = String, format = Binary)]
    pub photo: Vec<u8>,
}

/// `multipart/form-data` body of `PATCH /v1/presentator/{id}`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PresentatorPatchForm {
    pub presentator_name: Option<String>,
    pub presentator_type: Option<String>,
    pub presentator_bio: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub photo: Option<Vec<u8>>,
}

/// `multipart/form-data` body of `POST /v1/recordedbroadcast`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RecordedBroadcastForm {
    pub board_id: String,
    pub medium_id: String,
    pub class_id: String,
    pub subject_id: String,
    pub book_id: String,
    pub chapter_id: String,
    pub studio: String,
    pub live_streaming_path: String,
    #[schema(example = "2024-03-01")]
    pub broadcast_date: String,
    #[schema(example = "10:30")]
    pub broadcast_time: String,
    pub title: String,
    pub broadcast_type: String,
    pub presenter_name: String,
    #[schema(value_type = String, format = Binary)]
    pub landscape_image: Vec<u8>,
    #[schema(value_type = String, format = Binary)]
    pub portrait_image: Vec<u8>,
}

/// `multipart/form-data` body of `PATCH /v1/recordedbroadcast/{id}`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RecordedBroadcastPatchForm {
    pub board_id: Option<String>,
    pub medium_id: Option<String>,
    pub class_id: Option<String>,
    pub subject_id: Option<String>,
    pub book_id: Option<String>,
    pub chapter_id: Option<String>,
    pub studio: Option<String>,
    pub live_streaming_path: Option<String>,
    pub broadcast_date: Option<String>,
    pub broadcast_time: Option<String>,
    pub title: Option<String>,
    pub broadcast_type: Option<String>,
    pub presenter_name: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub landscape_image: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub portrait_image: Option<Vec<u8>>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "LMS content API"),
    paths(
        health::health_check,
        book::create_book,
        book::list_books,
        book::get_book,
        book::get_book_by_subject,
        book::get_book_by_filter,
        book::update_book,
        book::delete_book,
        presentator::create_presentator,
        presentator::list_presentators,
        presentator::get_presentator,
        presentator::update_presentator,
        presentator::delete_presentator,
        recorded_broadcast::create_recorded_broadcast,
        recorded_broadcast::list_recorded_broadcasts,
        recorded_broadcast::get_recorded_broadcast,
        recorded_broadcast::list_by_class_subject,
        recorded_broadcast::chapters_for_book,
        recorded_broadcast::find_by_composite,
        recorded_broadcast::update_recorded_broadcast,
        recorded_broadcast::delete_recorded_broadcast,
        section::create_section,
        section::list_sections,
        section::get_section,
        section::update_section,
        section::delete_section,
        leaving_cert::create_leaving_cert,
        leaving_cert::list_leaving_certs,
        leaving_cert::get_leaving_cert,
        leaving_cert::update_leaving_cert,
        leaving_cert::delete_leaving_cert,
    ),
    components(schemas(
        ErrorBody,
        FieldViolation,
        Book,
        BookForm,
        BookPatchForm,
        Presentator,
        PresentatorForm,
        PresentatorPatchForm,
        RecordedBroadcast,
        RecordedBroadcastForm,
        RecordedBroadcastPatchForm,
        ChapterBroadcasts,
        recorded_broadcast::ChaptersResponse,
        Section,
        CreateSection,
        UpdateSection,
        LeavingCert,
        CreateLeavingCert,
        UpdateLeavingCert,
    )),
    tags(
        (name = health::HEALTH_TAG, description = "Service health"),
        (name = book::BOOK_TAG, description = "Textbooks with cover images"),
        (name = presentator::PRESENTATOR_TAG, description = "Broadcast presenters with portraits"),
        (name = recorded_broadcast::RECORDED_BROADCAST_TAG, description = "Recorded lessons and curriculum lookups"),
        (name = section::SECTION_TAG, description = "School sections"),
        (name = leaving_cert::LEAVING_CERT_TAG, description = "Leaving certificates"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/health",
            "/v1/book",
            "/v1/book/{id}",
            "/v1/book/subject/{subject_id}",
            "/v1/book/filter/{board_id}/{medium_id}/{class_id}/{subject_id}",
            "/v1/presentator",
            "/v1/presentator/{id}",
            "/v1/recordedbroadcast",
            "/v1/recordedbroadcast/{id}",
            "/v1/recordedbroadcast/filter/{class_id}/{subject_id}",
            "/v1/recordedbroadcast/getrecordedvideo/{book_id}",
            "/v1/recordedbroadcast/filterby/{board_id}/{class_id}/{subject_id}/{medium_id}/{chapter_id}/{book_id}",
            "/v1/section",
            "/v1/section/{id}",
            "/v1/leavingcert",
            "/v1/leavingcert/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn media_routes_document_multipart_bodies() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let create = &json["paths"]["/v1/book"]["post"]["requestBody"]["content"];

        assert!(create.get("multipart/form-data").is_some());
        assert_eq!(
            json["components"]["schemas"]["BookForm"]["properties"]["thumbnail"]["format"],
            "binary"
        );
    }
}
