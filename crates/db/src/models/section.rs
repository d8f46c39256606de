//! Section model and DTOs.

use lms_core::error::CoreError;
use lms_core::pagination::{PageRequest, SortFields};
use lms_core::types::{DbId, Timestamp};
use lms_core::validation::{empty_update, not_blank};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Fields accepted by `sortBy` on the section list endpoint.
pub const SECTION_SORT_FIELDS: SortFields = &[
    ("id", "id"),
    ("name", "name"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// A row from the `sections` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub name: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for creating a new section.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSection {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}

/// DTO for partially updating a section.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_section"))]
pub struct UpdateSection {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
}

fn validate_update_section(dto: &UpdateSection) -> Result<(), ValidationError> {
    if dto.name.is_none() {
        return Err(empty_update());
    }
    Ok(())
}

/// Exact-match filter for listing sections.
#[derive(Debug, Clone, Default)]
pub struct SectionFilter {
    pub name: Option<String>,
}

/// Query parameters for `GET /section`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct SectionListParams {
    pub name: Option<String>,
    pub sort_by: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<i64>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: Option<i64>,
}

impl SectionListParams {
    pub fn filter(&self) -> SectionFilter {
        SectionFilter {
            name: self.name.clone(),
        }
    }

    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(
            self.sort_by.as_deref(),
            self.limit,
            self.page,
            SECTION_SORT_FIELDS,
        )
    }
}
