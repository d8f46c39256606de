use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lms_cloud::StorageError;
use lms_core::error::{CoreError, FieldViolation};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::ServiceError;

/// Generic client-facing text for every 500.
pub(crate) const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{"code", "message"}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lms_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An object store failure while persisting an upload.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A malformed request that is not a field-level validation failure
    /// (broken multipart body, missing or unsupported upload).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { entity, id } => {
                AppError::Core(CoreError::NotFound { entity, id })
            }
            ServiceError::Database(e) => AppError::Database(e),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable code such as `NOT_FOUND` or `VALIDATION_ERROR`.
    #[schema(value_type = String, example = "NOT_FOUND")]
    pub code: &'static str,
    pub message: String,
    /// Field-level failures; only on `VALIDATION_ERROR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
    /// Internal error text of a 500, added in development only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: None,
            detail: None,
        }
    }
}

/// Underlying error text of a 500, attached to the response as an extension.
///
/// The detail middleware copies it into the body in development and drops it
/// otherwise; it never reaches the client on its own.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
    errors: Option<Vec<FieldViolation>>,
    detail: Option<String>,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            errors: None,
            detail: None,
        }
    }

    fn validation(message: impl Into<String>, errors: Vec<FieldViolation>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
        }
    }

    fn internal(detail: String) -> Self {
        tracing::error!(error = %detail, "Internal error");
        Self {
            detail: Some(detail),
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE,
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = match self {
            // --- CoreError variants ---
            AppError::Core(core) => {
                let message = core.to_string();
                match core {
                    CoreError::NotFound { .. } | CoreError::NoMatch(_) => {
                        Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
                    }
                    CoreError::InvalidFields(violations) => {
                        Rendered::validation(message, violations)
                    }
                }
            }

            // --- Infrastructure errors ---
            AppError::Database(err) => classify_sqlx_error(&err),
            AppError::Storage(err) => Rendered::internal(err.to_string()),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => Rendered::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::PayloadTooLarge(msg) => {
                Rendered::new(StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg)
            }
            AppError::InternalError(msg) => Rendered::internal(msg),
        };

        let body = ErrorBody {
            errors: rendered.errors,
            ..ErrorBody::new(rendered.code, rendered.message)
        };

        let mut response = (rendered.status, axum::Json(body)).into_response();
        if let Some(detail) = rendered.detail {
            response.extensions_mut().insert(ErrorDetail(detail));
        }
        response
    }
}

/// Classify a sqlx error into a rendered response.
///
/// `RowNotFound` maps to 404; everything else is a 500 with a sanitized
/// message.
fn classify_sqlx_error(err: &sqlx::Error) -> Rendered {
    match err {
        sqlx::Error::RowNotFound => {
            Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        other => Rendered::internal(format!("Database error: {other}")),
    }
}
