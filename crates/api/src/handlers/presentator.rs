//! Handlers for the `/presentator` resource.
//!
//! Create and update take `multipart/form-data` with the portrait in the
//! `photo` part.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lms_core::error::CoreError;
use lms_core::pagination::Page;
use lms_core::types::DbId;
use lms_core::validation::validate;
use lms_db::models::presentator::{
    CreatePresentator, Presentator, PresentatorListParams, UpdatePresentator,
};

use crate::error::{AppError, AppResult, ErrorBody};
use crate::extract::{FormData, RecordId, ValidQuery};
use crate::openapi::{PresentatorForm, PresentatorPatchForm};
use crate::services::presentator::PRESENTATOR;
use crate::services::PresentatorService;
use crate::state::AppState;
use crate::upload::{PendingUpload, UploadForm};

/// Tag grouping `/presentator` endpoints in the OpenAPI document.
pub static PRESENTATOR_TAG: &str = "presentator";

/// Multipart part holding the portrait.
pub const PHOTO_FIELD: &str = "photo";

/// Object key segment for presentator portraits.
const UPLOAD_RESOURCE: &str = "photo";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: PRESENTATOR,
        id,
    })
}

/// POST /v1/presentator
///
/// The `photo` file is required.
#[utoipa::path(
    post,
    path = "/v1/presentator",
    tag = PRESENTATOR_TAG,
    request_body(content = PresentatorForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Presentator created", body = Presentator),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 413, description = "Upload too large", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn create_presentator(
    State(state): State<AppState>,
    FormData(multipart): FormData,
) -> AppResult<(StatusCode, Json<Presentator>)> {
    let mut form = UploadForm::read(multipart, &[PHOTO_FIELD]).await?;
    let mut input: CreatePresentator = form.parse()?;
    let photo = PendingUpload::new(&state, UPLOAD_RESOURCE, form.require_file(PHOTO_FIELD)?);

    input.photo = photo.url().to_string();
    validate(&input)?;
    photo.write(&state).await?;

    let presentator = PresentatorService::new(&state.pool).create(&input).await?;

    tracing::info!(presentator_id = presentator.id, "Presentator created");

    Ok((StatusCode::CREATED, Json(presentator)))
}

/// GET /v1/presentator
///
/// Filterable by `presentatorName`.
#[utoipa::path(
    get,
    path = "/v1/presentator",
    tag = PRESENTATOR_TAG,
    params(PresentatorListParams),
    responses(
        (status = 200, description = "One page of presentators", body = Page<Presentator>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn list_presentators(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<PresentatorListParams>,
) -> AppResult<Json<Page<Presentator>>> {
    let page = params.page_request()?;
    let presentators = PresentatorService::new(&state.pool)
        .list(&params.filter(), &page)
        .await?;

    Ok(Json(presentators))
}

/// GET /v1/presentator/{id}
#[utoipa::path(
    get,
    path = "/v1/presentator/{id}",
    tag = PRESENTATOR_TAG,
    params(("id" = i64, Path, description = "Presentator id")),
    responses(
        (status = 200, description = "The presentator", body = Presentator),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Presentator not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn get_presentator(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<Presentator>> {
    let presentator = PresentatorService::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(presentator))
}

/// PATCH /v1/presentator/{id}
///
/// The photo is replaced only when a new file is sent.
#[utoipa::path(
    patch,
    path = "/v1/presentator/{id}",
    tag = PRESENTATOR_TAG,
    params(("id" = i64, Path, description = "Presentator id")),
    request_body(content = PresentatorPatchForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Presentator updated", body = Presentator),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Presentator not found", body = ErrorBody),
        (status = 413, description = "Upload too large", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn update_presentator(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    FormData(multipart): FormData,
) -> AppResult<Json<Presentator>> {
    let mut form = UploadForm::read(multipart, &[PHOTO_FIELD]).await?;
    let mut input: UpdatePresentator = form.parse()?;
    let photo = form
        .take_file(PHOTO_FIELD)
        .map(|file| PendingUpload::new(&state, UPLOAD_RESOURCE, file));

    input.photo = photo.as_ref().map(|upload| upload.url().to_string());
    validate(&input)?;

    let service = PresentatorService::new(&state.pool);
    if let Some(upload) = photo {
        service.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
        upload.write(&state).await?;
    }

    let presentator = service.update(id, &input).await?;

    tracing::info!(presentator_id = id, "Presentator updated");

    Ok(Json(presentator))
}

/// DELETE /v1/presentator/{id}
#[utoipa::path(
    delete,
    path = "/v1/presentator/{id}",
    tag = PRESENTATOR_TAG,
    params(("id" = i64, Path, description = "Presentator id")),
    responses(
        (status = 204, description = "Presentator deleted"),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Presentator not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn delete_presentator(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<StatusCode> {
    PresentatorService::new(&state.pool).delete(id).await?;

    tracing::info!(presentator_id = id, "Presentator deleted");

    Ok(StatusCode::NO_CONTENT)
}
