//! Repository for the `books` table.

use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, BookFilter, BookLookup, CreateBook, UpdateBook};

/// Column list for `books` queries.
const COLUMNS: &str = "\
    id, title, board_id, medium_id, class_id, subject_id, thumbnail, \
    created_at, updated_at";

/// `WHERE` clause shared by the list and count queries (`$1` = board_id).
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR board_id = $1)";

/// Provides CRUD and lookup operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row.
    pub async fn create(pool: &PgPool, dto: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, board_id, medium_id, class_id, subject_id, thumbnail) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&dto.title)
            .bind(&dto.board_id)
            .bind(&dto.medium_id)
            .bind(&dto.class_id)
            .bind(&dto.subject_id)
            .bind(&dto.thumbnail)
            .fetch_one(pool)
            .await
    }

    /// List one page of books matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &BookFilter,
        page: &PageRequest,
    ) -> Result<Page<Book>, sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM books {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.board_id)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM books {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            page.order_by()
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(&filter.board_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    /// Find a book by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the oldest book for a subject.
    pub async fn find_by_subject(
        pool: &PgPool,
        subject_id: &str,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books WHERE subject_id = $1 \
             ORDER BY created_at ASC, id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(subject_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the oldest book matching a board/medium/class/subject tuple.
    pub async fn find_by_lookup(
        pool: &PgPool,
        lookup: &BookLookup,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books \
             WHERE board_id = $1 AND medium_id = $2 AND class_id = $3 AND subject_id = $4 \
             ORDER BY created_at ASC, id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&lookup.board_id)
            .bind(&lookup.medium_id)
            .bind(&lookup.class_id)
            .bind(&lookup.subject_id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a book.
    ///
    /// Uses `COALESCE` so only provided fields are changed. Returns `None`
    /// if no row exists with the given ID.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET \
                 title = COALESCE($2, title), \
                 board_id = COALESCE($3, board_id), \
                 medium_id = COALESCE($4, medium_id), \
                 class_id = COALESCE($5, class_id), \
                 subject_id = COALESCE($6, subject_id), \
                 thumbnail = COALESCE($7, thumbnail) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.board_id)
            .bind(&dto.medium_id)
            .bind(&dto.class_id)
            .bind(&dto.subject_id)
            .bind(&dto.thumbnail)
            .fetch_optional(pool)
            .await
    }

    /// Delete a book, returning its last state, or `None` if absent.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("DELETE FROM books WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
