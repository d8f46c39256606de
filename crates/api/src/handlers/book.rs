//! Handlers for the `/book` resource.
//!
//! Create and update take `multipart/form-data`: the text parts carry the
//! book fields and the `thumbnail` part carries the cover image. The stored
//! `thumbnail` value is the object store's public URL.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lms_core::error::CoreError;
use lms_core::pagination::Page;
use lms_core::types::DbId;
use lms_core::validation::validate;
use lms_db::models::book::{
    Book, BookListParams, BookLookup, CreateBook, SubjectLookup, UpdateBook,
};

use crate::error::{AppError, AppResult, ErrorBody};
use crate::extract::{FormData, RecordId, ValidPath, ValidQuery};
use crate::openapi::{BookForm, BookPatchForm};
use crate::services::book::BOOK;
use crate::services::BookService;
use crate::state::AppState;
use crate::upload::{PendingUpload, UploadForm};

/// Tag grouping `/book` endpoints in the OpenAPI document.
pub static BOOK_TAG: &str = "book";

/// Multipart part holding the cover image.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Object key segment for book covers.
const UPLOAD_RESOURCE: &str = "book";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: BOOK, id })
}

fn no_match() -> AppError {
    AppError::Core(CoreError::NoMatch("book not found".into()))
}

/// POST /v1/book
///
/// The `thumbnail` file is required.
#[utoipa::path(
    post,
    path = "/v1/book",
    tag = BOOK_TAG,
    request_body(content = BookForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 413, description = "Upload too large", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn create_book(
    State(state): State<AppState>,
    FormData(multipart): FormData,
) -> AppResult<(StatusCode, Json<Book>)> {
    let mut form = UploadForm::read(multipart, &[THUMBNAIL_FIELD]).await?;
    let mut input: CreateBook = form.parse()?;
    let thumbnail = PendingUpload::new(
        &state,
        UPLOAD_RESOURCE,
        form.require_file(THUMBNAIL_FIELD)?,
    );

    input.thumbnail = thumbnail.url().to_string();
    validate(&input)?;
    thumbnail.write(&state).await?;

    let book = BookService::new(&state.pool).create(&input).await?;

    tracing::info!(book_id = book.id, subject_id = %book.subject_id, "Book created");

    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /v1/book
///
/// Filterable by `boardId`.
#[utoipa::path(
    get,
    path = "/v1/book",
    tag = BOOK_TAG,
    params(BookListParams),
    responses(
        (status = 200, description = "One page of books", body = Page<Book>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn list_books(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<BookListParams>,
) -> AppResult<Json<Page<Book>>> {
    let page = params.page_request()?;
    let books = BookService::new(&state.pool)
        .list(&params.filter(), &page)
        .await?;

    Ok(Json(books))
}

/// GET /v1/book/{id}
#[utoipa::path(
    get,
    path = "/v1/book/{id}",
    tag = BOOK_TAG,
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Book not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn get_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<Book>> {
    let book = BookService::new(&state.pool)
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(book))
}

/// GET /v1/book/subject/{subject_id}
///
/// The oldest book for the subject.
#[utoipa::path(
    get,
    path = "/v1/book/subject/{subject_id}",
    tag = BOOK_TAG,
    params(("subject_id" = String, Path)),
    responses(
        (status = 200, description = "Oldest book for the subject", body = Book),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "No book for the subject", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn get_book_by_subject(
    State(state): State<AppState>,
    ValidPath(lookup): ValidPath<SubjectLookup>,
) -> AppResult<Json<Book>> {
    let book = BookService::new(&state.pool)
        .find_by_subject(&lookup.subject_id)
        .await?
        .ok_or_else(no_match)?;

    Ok(Json(book))
}

/// GET /v1/book/filter/{board_id}/{medium_id}/{class_id}/{subject_id}
///
/// The oldest book matching all four curriculum ids.
#[utoipa::path(
    get,
    path = "/v1/book/filter/{board_id}/{medium_id}/{class_id}/{subject_id}",
    tag = BOOK_TAG,
    params(("board_id" = String, Path), ("medium_id" = String, Path), ("class_id" = String, Path), ("subject_id" = String, Path)),
    responses(
        (status = 200, description = "Oldest matching book", body = Book),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "No matching book", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn get_book_by_filter(
    State(state): State<AppState>,
    ValidPath(lookup): ValidPath<BookLookup>,
) -> AppResult<Json<Book>> {
    let book = BookService::new(&state.pool)
        .find_by_filter(&lookup)
        .await?
        .ok_or_else(no_match)?;

    Ok(Json(book))
}

/// PATCH /v1/book/{id}
///
/// The thumbnail is replaced only when a new file is sent, and is written
/// only once the book is known to exist.
#[utoipa::path(
    patch,
    path = "/v1/book/{id}",
    tag = BOOK_TAG,
    params(("id" = i64, Path, description = "Book id")),
    request_body(content = BookPatchForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Book not found", body = ErrorBody),
        (status = 413, description = "Upload too large", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn update_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    FormData(multipart): FormData,
) -> AppResult<Json<Book>> {
    let mut form = UploadForm::read(multipart, &[THUMBNAIL_FIELD]).await?;
    let mut input: UpdateBook = form.parse()?;
    let thumbnail = form
        .take_file(THUMBNAIL_FIELD)
        .map(|file| PendingUpload::new(&state, UPLOAD_RESOURCE, file));

    input.thumbnail = thumbnail.as_ref().map(|upload| upload.url().to_string());
    validate(&input)?;

    let service = BookService::new(&state.pool);
    if let Some(upload) = thumbnail {
        service.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
        upload.write(&state).await?;
    }

    let book = service.update(id, &input).await?;

    tracing::info!(book_id = id, "Book updated");

    Ok(Json(book))
}

/// DELETE /v1/book/{id}
#[utoipa::path(
    delete,
    path = "/v1/book/{id}",
    tag = BOOK_TAG,
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Book not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
)]
pub async fn delete_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<StatusCode> {
    BookService::new(&state.pool).delete(id).await?;

    tracing::info!(book_id = id, "Book deleted");

    Ok(StatusCode::NO_CONTENT)
}
