//! Handlers for the `/recordedbroadcast` resource.
//!
//! Create and update take `multipart/form-data` with two image parts,
//! `landscapeImage` and `portraitImage`. Besides CRUD there are three
//! curriculum lookups used by the player.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lms_core::error::CoreError;
use lms_core::pagination::Page;
use lms_core::types::DbId;
use lms_core::validation::validate;
use lms_db::models::recorded_broadcast::{
    BookChaptersLookup, BroadcastLookup, ChapterBroadcasts, ClassSubjectLookup,
    CreateRecordedBroadcast, RecordedBroadcast, RecordedBroadcastListParams,
    UpdateRecordedBroadcast,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult, ErrorBody};
use crate::extract::{FormData, RecordId, ValidPath, ValidQuery};
use crate::openapi::{RecordedBroadcastForm, RecordedBroadcastPatchForm};
use crate::services::recorded_broadcast::RECORDED_BROADCAST;
use crate::services::RecordedBroadcastService;
use crate::state::AppState;
use crate::upload::{PendingUpload, UploadForm};

/// Tag grouping `/recordedbroadcast` endpoints in the OpenAPI document.
pub static RECORDED_BROADCAST_TAG: &str = "recordedbroadcast";

pub const LANDSCAPE_IMAGE_FIELD: &str = "landscapeImage";
pub const PORTRAIT_IMAGE_FIELD: &str = "portraitImage";

const IMAGE_FIELDS: &[&str] = &[LANDSCAPE_IMAGE_FIELD, PORTRAIT_IMAGE_FIELD];

/// Object key segments for the two images.
const LANDSCAPE_RESOURCE: &str = "landscape";
const PORTRAIT_RESOURCE: &str = "portrait";

/// Client-facing message when the six-field lookup matches nothing.
pub const NO_BROADCAST_MATCH: &str = "no recorded broadcast found for the given parameters";

/// Response body of `/getrecordedvideo/{book_id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChaptersResponse {
    pub chapters_data: Vec<ChapterBroadcasts>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: RECORDED_BROADCAST,
        id,
    })
}

/// POST /v1/recordedbroadcast
///
/// Both image files are required.
#[utoipa::path(
    post,
    path = "/v1/recordedbroadcast",
    tag = RECORDED_BROADCAST_TAG,
    request_body(content = RecordedBroadcastForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Broadcast created", body = RecordedBroadcast),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 413, description = "Upload too large", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn create_recorded_broadcast(
    State(state): State<AppState>,
    FormData(multipart): FormData,
) -> AppResult<(StatusCode, Json<RecordedBroadcast>)> {
    let mut form = UploadForm::read(multipart, IMAGE_FIELDS).await?;
    let mut input: CreateRecordedBroadcast = form.parse()?;
    let landscape = PendingUpload::new(
        &state,
        LANDSCAPE_RESOURCE,
        form.require_file(LANDSCAPE_IMAGE_FIELD)?,
    );
    let portrait = PendingUpload::new(
        &state,
        PORTRAIT_RESOURCE,
        form.require_file(PORTRAIT_IMAGE_FIELD)?,
    );

    input.landscape_image = landscape.url().to_string();
    input.portrait_image = portrait.url().to_string();
    validate(&input)?;
    landscape.write(&state).await?;
    portrait.write(&state).await?;

    let broadcast = RecordedBroadcastService::new(&state.pool)
        .create(&input)
        .await?;

    tracing::info!(
        recorded_broadcast_id = broadcast.id,
        book_id = %broadcast.book_id,
        chapter_id = %broadcast.chapter_id,
        "Recorded broadcast created",
    );

    Ok((StatusCode::CREATED, Json(broadcast)))
}

/// GET /v1/recordedbroadcast
///
/// Filterable by `title`.
#[utoipa::path(
    get,
    path = "/v1/recordedbroadcast",
    tag = RECORDED_BROADCAST_TAG,
    params(RecordedBroadcastListParams),
    responses(
        (status = 200, description = "One page of broadcasts", body = Page<RecordedBroadcast>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn list_recorded_broadcasts(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<RecordedBroadcastListParams>,
) -> AppResult<Json<Page<RecordedBroadcast>>> {
    let page = params.page_request()?;
    let broadcasts = RecordedBroadcastService::new(&state.pool)
        .list(&params.filter(), &page)
        .await?;

    Ok(Json(broadcasts))
}

/// GET /v1/recordedbroadcast/{id}
#[utoipa::path(
    get,
    path = "/v1/recordedbroadcast/{id}",
    tag = RECORDED_BROADCAST_TAG,
    params(("id" = i64, Path, description = "Broadcast id")),
    responses(
        (status = 200, description = "The broadcast", body = RecordedBroadcast),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Broadcast not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn get_recorded_broadcast(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<RecordedBroadcast>> {
    let broadcast = RecordedBroadcastService::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(broadcast))
}

/// GET /v1/recordedbroadcast/filter/{class_id}/{subject_id}
///
/// Every broadcast for the class and subject; empty when none match.
#[utoipa::path(
    get,
    path = "/v1/recordedbroadcast/filter/{class_id}/{subject_id}",
    tag = RECORDED_BROADCAST_TAG,
    params(("class_id" = String, Path), ("subject_id" = String, Path)),
    responses(
        (status = 200, description = "Broadcasts for the class and subject", body = Vec<RecordedBroadcast>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn list_by_class_subject(
    State(state): State<AppState>,
    ValidPath(lookup): ValidPath<ClassSubjectLookup>,
) -> AppResult<Json<Vec<RecordedBroadcast>>> {
    let broadcasts = RecordedBroadcastService::new(&state.pool)
        .list_by_class_subject(&lookup.class_id, &lookup.subject_id)
        .await?;

    Ok(Json(broadcasts))
}

/// GET /v1/recordedbroadcast/getrecordedvideo/{book_id}
///
/// Broadcasts of a book grouped by chapter.
#[utoipa::path(
    get,
    path = "/v1/recordedbroadcast/getrecordedvideo/{book_id}",
    tag = RECORDED_BROADCAST_TAG,
    params(("book_id" = String, Path)),
    responses(
        (status = 200, description = "Broadcasts grouped by chapter", body = ChaptersResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn chapters_for_book(
    State(state): State<AppState>,
    ValidPath(lookup): ValidPath<BookChaptersLookup>,
) -> AppResult<Json<ChaptersResponse>> {
    let chapters_data = RecordedBroadcastService::new(&state.pool)
        .chapters_for_book(&lookup.book_id)
        .await?;

    Ok(Json(ChaptersResponse { chapters_data }))
}

/// GET /v1/recordedbroadcast/filterby/{board_id}/{class_id}/{subject_id}/{medium_id}/{chapter_id}/{book_id}
#[utoipa::path(
    get,
    path = "/v1/recordedbroadcast/filterby/{board_id}/{class_id}/{subject_id}/{medium_id}/{chapter_id}/{book_id}",
    tag = RECORDED_BROADCAST_TAG,
    params(("board_id" = String, Path), ("class_id" = String, Path), ("subject_id" = String, Path), ("medium_id" = String, Path), ("chapter_id" = String, Path), ("book_id" = String, Path)),
    responses(
        (status = 200, description = "The matching broadcast", body = RecordedBroadcast),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "No matching broadcast", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn find_by_composite(
    State(state): State<AppState>,
    ValidPath(lookup): ValidPath<BroadcastLookup>,
) -> AppResult<Json<RecordedBroadcast>> {
    let broadcast = RecordedBroadcastService::new(&state.pool)
        .find_by_composite(&lookup)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NoMatch(NO_BROADCAST_MATCH.into())))?;

    Ok(Json(broadcast))
}

/// PATCH /v1/recordedbroadcast/{id}
///
/// Each image is replaced only when a new file is sent for it.
#[utoipa::path(
    patch,
    path = "/v1/recordedbroadcast/{id}",
    tag = RECORDED_BROADCAST_TAG,
    params(("id" = i64, Path, description = "Broadcast id")),
    request_body(content = RecordedBroadcastPatchForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Broadcast updated", body = RecordedBroadcast),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Broadcast not found", body = ErrorBody),
        (status = 413, description = "Upload too large", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn update_recorded_broadcast(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    FormData(multipart): FormData,
) -> AppResult<Json<RecordedBroadcast>> {
    let mut form = UploadForm::read(multipart, IMAGE_FIELDS).await?;
    let mut input: UpdateRecordedBroadcast = form.parse()?;
    let landscape = form
        .take_file(LANDSCAPE_IMAGE_FIELD)
        .map(|file| PendingUpload::new(&state, LANDSCAPE_RESOURCE, file));
    let portrait = form
        .take_file(PORTRAIT_IMAGE_FIELD)
        .map(|file| PendingUpload::new(&state, PORTRAIT_RESOURCE, file));

    input.landscape_image = landscape.as_ref().map(|upload| upload.url().to_string());
    input.portrait_image = portrait.as_ref().map(|upload| upload.url().to_string());
    validate(&input)?;

    let service = RecordedBroadcastService::new(&state.pool);
    if landscape.is_some() || portrait.is_some() {
        service.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    }
    for upload in landscape.into_iter().chain(portrait) {
        upload.write(&state).await?;
    }

    let broadcast = service.update(id, &input).await?;

    tracing::info!(recorded_broadcast_id = id, "Recorded broadcast updated");

    Ok(Json(broadcast))
}

/// DELETE /v1/recordedbroadcast/{id}
#[utoipa::path(
    delete,
    path = "/v1/recordedbroadcast/{id}",
    tag = RECORDED_BROADCAST_TAG,
    params(("id" = i64, Path, description = "Broadcast id")),
    responses(
        (status = 204, description = "Broadcast deleted"),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Broadcast not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn delete_recorded_broadcast(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<StatusCode> {
    RecordedBroadcastService::new(&state.pool).delete(id).await?;

    tracing::info!(recorded_broadcast_id = id, "Recorded broadcast deleted");

    Ok(StatusCode::NO_CONTENT)
}
