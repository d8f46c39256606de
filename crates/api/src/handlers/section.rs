//! Handlers for the `/section` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lms_core::error::CoreError;
use lms_core::pagination::Page;
use lms_db::models::section::{CreateSection, Section, SectionListParams, UpdateSection};

use crate::error::{AppError, AppResult, ErrorBody};
use crate::extract::{RecordId, ValidJson, ValidQuery};
use crate::services::section::SECTION;
use crate::services::SectionService;
use crate::state::AppState;

/// Tag grouping `/section` endpoints in the OpenAPI document.
pub static SECTION_TAG: &str = "section";

/// POST /v1/section
#[utoipa::path(
    post,
    path = "/v1/section",
    tag = SECTION_TAG,
    request_body = CreateSection,
    responses(
        (status = 201, description = "Section created", body = Section),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn create_section(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateSection>,
) -> AppResult<(StatusCode, Json<Section>)> {
    let section = SectionService::new(&state.pool).create(&input).await?;

    tracing::info!(section_id = section.id, "Section created");

    Ok((StatusCode::CREATED, Json(section)))
}

/// GET /v1/section
#[utoipa::path(
    get,
    path = "/v1/section",
    tag = SECTION_TAG,
    params(SectionListParams),
    responses(
        (status = 200, description = "One page of sections", body = Page<Section>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn list_sections(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<SectionListParams>,
) -> AppResult<Json<Page<Section>>> {
    let page = params.page_request()?;
    let sections = SectionService::new(&state.pool)
        .list(&params.filter(), &page)
        .await?;

    Ok(Json(sections))
}

/// GET /v1/section/{id}
#[utoipa::path(
    get,
    path = "/v1/section/{id}",
    tag = SECTION_TAG,
    params(("id" = i64, Path, description = "Section id")),
    responses(
        (status = 200, description = "The section", body = Section),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Section not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn get_section(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<Section>> {
    let section = SectionService::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: SECTION,
            id,
        }))?;

    Ok(Json(section))
}

/// PATCH /v1/section/{id}
#[utoipa::path(
    patch,
    path = "/v1/section/{id}",
    tag = SECTION_TAG,
    params(("id" = i64, Path, description = "Section id")),
    request_body = UpdateSection,
    responses(
        (status = 200, description = "Section updated", body = Section),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Section not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn update_section(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(input): ValidJson<UpdateSection>,
) -> AppResult<Json<Section>> {
    let section = SectionService::new(&state.pool).update(id, &input).await?;

    tracing::info!(section_id = id, "Section updated");

    Ok(Json(section))
}

/// DELETE /v1/section/{id}
#[utoipa::path(
    delete,
    path = "/v1/section/{id}",
    tag = SECTION_TAG,
    params(("id" = i64, Path, description = "Section id")),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Section not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn delete_section(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<StatusCode> {
    SectionService::new(&state.pool).delete(id).await?;

    tracing::info!(section_id = id, "Section deleted");

    Ok(StatusCode::NO_CONTENT)
}
