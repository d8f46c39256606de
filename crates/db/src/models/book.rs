//! Book model and DTOs.
//!
//! A book belongs to a board/medium/class/subject tuple. Those ids are
//! opaque references to records owned elsewhere and are never checked for
//! existence. `thumbnail` holds the public URL of the uploaded cover image.

use lms_core::error::CoreError;
use lms_core::pagination::{PageRequest, SortFields};
use lms_core::types::{DbId, Timestamp};
use lms_core::validation::{empty_update, not_blank, reference_id};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Fields accepted by `sortBy` on the book list endpoint.
pub const BOOK_SORT_FIELDS: SortFields = &[
    ("id", "id"),
    ("title", "title"),
    ("boardId", "board_id"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// A row from the `books` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub title: String,
    pub board_id: String,
    pub medium_id: String,
    pub class_id: String,
    pub subject_id: String,
    pub thumbnail: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for creating a new book.
///
/// `thumbnail` is never read from the request; the handler fills it with the
/// storage URL of the uploaded file.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateBook {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "reference_id"))]
    pub board_id: String,
    #[validate(custom(function = "reference_id"))]
    pub medium_id: String,
    #[validate(custom(function = "reference_id"))]
    pub class_id: String,
    #[validate(custom(function = "reference_id"))]
    pub subject_id: String,
    #[serde(skip_deserializing)]
    #[validate(custom(function = "not_blank"))]
    pub thumbnail: String,
}

/// DTO for partially updating a book.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_book"))]
pub struct UpdateBook {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub board_id: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub medium_id: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub class_id: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub subject_id: Option<String>,
    #[serde(skip_deserializing)]
    pub thumbnail: Option<String>,
}

fn validate_update_book(dto: &UpdateBook) -> Result<(), ValidationError> {
    let any = dto.title.is_some()
        || dto.board_id.is_some()
        || dto.medium_id.is_some()
        || dto.class_id.is_some()
        || dto.subject_id.is_some()
        || dto.thumbnail.is_some();
    if !any {
        return Err(empty_update());
    }
    Ok(())
}

/// Path parameter for `/subject/{subject_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubjectLookup {
    #[validate(custom(function = "reference_id"))]
    pub subject_id: String,
}

/// Path parameters for the four-field book lookup.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookLookup {
    #[validate(custom(function = "reference_id"))]
    pub board_id: String,
    #[validate(custom(function = "reference_id"))]
    pub medium_id: String,
    #[validate(custom(function = "reference_id"))]
    pub class_id: String,
    #[validate(custom(function = "reference_id"))]
    pub subject_id: String,
}

/// Exact-match filter for listing books.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub board_id: Option<String>,
}

/// Query parameters for `GET /book`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct BookListParams {
    #[validate(custom(function = "reference_id"))]
    pub board_id: Option<String>,
    pub sort_by: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<i64>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: Option<i64>,
}

impl BookListParams {
    pub fn filter(&self) -> BookFilter {
        BookFilter {
            board_id: self.board_id.clone(),
        }
    }

    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(self.sort_by.as_deref(), self.limit, self.page, BOOK_SORT_FIELDS)
    }
}
