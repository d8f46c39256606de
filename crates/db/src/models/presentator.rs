//! Presentator (narrator / teacher) model and DTOs.

use lms_core::error::CoreError;
use lms_core::pagination::{PageRequest, SortFields};
use lms_core::types::{DbId, Timestamp};
use lms_core::validation::{empty_update, not_blank};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Fields accepted by `sortBy` on the presentator list endpoint.
pub const PRESENTATOR_SORT_FIELDS: SortFields = &[
    ("id", "id"),
    ("presentatorName", "presentator_name"),
    ("presentatorType", "presentator_type"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// A row from the `presentators` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Presentator {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub presentator_name: String,
    pub presentator_type: String,
    pub presentator_bio: String,
    /// Public URL of the uploaded photo.
    pub photo: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for creating a presentator. `photo` is filled by the upload step.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePresentator {
    #[validate(custom(function = "not_blank"))]
    pub presentator_name: String,
    #[validate(custom(function = "not_blank"))]
    pub presentator_type: String,
    #[validate(custom(function = "not_blank"))]
    pub presentator_bio: String,
    #[serde(skip_deserializing)]
    #[validate(custom(function = "not_blank"))]
    pub photo: String,
}

/// DTO for partially updating a presentator.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_presentator"))]
pub struct UpdatePresentator {
    #[validate(custom(function = "not_blank"))]
    pub presentator_name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub presentator_type: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub presentator_bio: Option<String>,
    #[serde(skip_deserializing)]
    pub photo: Option<String>,
}

fn validate_update_presentator(dto: &UpdatePresentator) -> Result<(), ValidationError> {
    let any = dto.presentator_name.is_some()
        || dto.presentator_type.is_some()
        || dto.presentator_bio.is_some()
        || dto.photo.is_some();
    if !any {
        return Err(empty_update());
    }
    Ok(())
}

/// Exact-match filter for listing presentators.
#[derive(Debug, Clone, Default)]
pub struct PresentatorFilter {
    pub presentator_name: Option<String>,
}

/// Query parameters for `GET /presentator`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct PresentatorListParams {
    pub presentator_name: Option<String>,
    pub sort_by: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<i64>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: Option<i64>,
}

impl PresentatorListParams {
    pub fn filter(&self) -> PresentatorFilter {
        PresentatorFilter {
            presentator_name: self.presentator_name.clone(),
        }
    }

    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(
            self.sort_by.as_deref(),
            self.limit,
            self.page,
            PRESENTATOR_SORT_FIELDS,
        )
    }
}
