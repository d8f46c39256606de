//! Handlers for the `/leavingcert` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lms_core::error::CoreError;
use lms_core::pagination::Page;
use lms_db::models::leaving_cert::{
    CreateLeavingCert, LeavingCert, LeavingCertListParams, UpdateLeavingCert,
};

use crate::error::{AppError, AppResult, ErrorBody};
use crate::extract::{RecordId, ValidJson, ValidQuery};
use crate::services::leaving_cert::LEAVING_CERT;
use crate::services::LeavingCertService;
use crate::state::AppState;

/// Tag grouping `/leavingcert` endpoints in the OpenAPI document.
pub static LEAVING_CERT_TAG: &str = "leavingcert";

/// POST /v1/leavingcert
///
/// `status` defaults to active when omitted.
#[utoipa::path(
    post,
    path = "/v1/leavingcert",
    tag = LEAVING_CERT_TAG,
    request_body = CreateLeavingCert,
    responses(
        (status = 201, description = "Certificate issued", body = LeavingCert),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn create_leaving_cert(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateLeavingCert>,
) -> AppResult<(StatusCode, Json<LeavingCert>)> {
    let cert = LeavingCertService::new(&state.pool).create(&input).await?;

    tracing::info!(leaving_cert_id = cert.id, "Leaving certificate created");

    Ok((StatusCode::CREATED, Json(cert)))
}

/// GET /v1/leavingcert
///
/// Filterable by `applicantName` and `status`.
#[utoipa::path(
    get,
    path = "/v1/leavingcert",
    tag = LEAVING_CERT_TAG,
    params(LeavingCertListParams),
    responses(
        (status = 200, description = "One page of certificates", body = Page<LeavingCert>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn list_leaving_certs(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<LeavingCertListParams>,
) -> AppResult<Json<Page<LeavingCert>>> {
    let page = params.page_request()?;
    let certs = LeavingCertService::new(&state.pool)
        .list(&params.filter(), &page)
        .await?;

    Ok(Json(certs))
}

/// GET /v1/leavingcert/{id}
#[utoipa::path(
    get,
    path = "/v1/leavingcert/{id}",
    tag = LEAVING_CERT_TAG,
    params(("id" = i64, Path, description = "Certificate id")),
    responses(
        (status = 200, description = "The certificate", body = LeavingCert),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Certificate not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn get_leaving_cert(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<LeavingCert>> {
    let cert = LeavingCertService::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: LEAVING_CERT,
            id,
        }))?;

    Ok(Json(cert))
}

/// PATCH /v1/leavingcert/{id}
#[utoipa::path(
    patch,
    path = "/v1/leavingcert/{id}",
    tag = LEAVING_CERT_TAG,
    params(("id" = i64, Path, description = "Certificate id")),
    request_body = UpdateLeavingCert,
    responses(
        (status = 200, description = "Certificate updated", body = LeavingCert),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Certificate not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn update_leaving_cert(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(input): ValidJson<UpdateLeavingCert>,
) -> AppResult<Json<LeavingCert>> {
    let cert = LeavingCertService::new(&state.pool).update(id, &input).await?;

    tracing::info!(leaving_cert_id = id, status = cert.status, "Leaving certificate updated");

    Ok(Json(cert))
}

/// DELETE /v1/leavingcert/{id}
#[utoipa::path(
    delete,
    path = "/v1/leavingcert/{id}",
    tag = LEAVING_CERT_TAG,
    params(("id" = i64, Path, description = "Certificate id")),
    responses(
        (status = 204, description = "Certificate deleted"),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Certificate not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn delete_leaving_cert(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<StatusCode> {
    LeavingCertService::new(&state.pool).delete(id).await?;

    tracing::info!(leaving_cert_id = id, "Leaving certificate deleted");

    Ok(StatusCode::NO_CONTENT)
}
