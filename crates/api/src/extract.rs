//! Validating extractors.
//!
//! Wrap axum's `Json`, `Query` and `Path` so that both deserialization
//! failures and `validator` rule violations come back as
//! [`CoreError::InvalidFields`], i.e. a `VALIDATION_ERROR` envelope, and
//! never reach a handler body. [`FormData`] does the same for multipart
//! bodies, whose framing errors are a `BAD_REQUEST` envelope.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Multipart, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use lms_core::error::{CoreError, FieldViolation};
use lms_core::types::DbId;
use lms_core::validation::{validate, BODY_FIELD};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// Field name reported for query-string deserialization failures.
const QUERY_FIELD: &str = "query";
/// Field name reported for path deserialization failures.
const PATH_FIELD: &str = "path";
/// Field name reported for a malformed record id.
const ID_FIELD: &str = "id";

/// JSON body deserialized into `T` and checked with `T::validate`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        validate(&value)?;
        Ok(Self(value))
    }
}

/// A `multipart/form-data` body.
///
/// A missing or malformed content type or boundary is rejected with the
/// `BAD_REQUEST` envelope instead of axum's plain-text response.
pub struct FormData(pub Multipart);

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Multipart::from_request(req, state)
            .await
            .map(Self)
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

/// Query string deserialized into `T` and checked with `T::validate`.
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        validate(&value)?;
        Ok(Self(value))
    }
}

/// Path parameters deserialized into `T` and checked with `T::validate`.
#[derive(Debug)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        validate(&value)?;
        Ok(Self(value))
    }
}

/// The `{id}` path segment of a single-record route. Must be a positive
/// integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub DbId);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || invalid_field(ID_FIELD, "must be a positive integer");
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;
        if id < 1 {
            return Err(invalid());
        }
        Ok(Self(id))
    }
}

fn invalid_field(field: &str, message: impl Into<String>) -> AppError {
    AppError::Core(CoreError::InvalidFields(vec![FieldViolation::new(
        field, message,
    )]))
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
        _ => invalid_field(BODY_FIELD, rejection.body_text()),
    }
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    invalid_field(QUERY_FIELD, rejection.body_text())
}

fn path_rejection(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => invalid_field(PATH_FIELD, e.body_text()),
        other => AppError::InternalError(other.body_text()),
    }
}
