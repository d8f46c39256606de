//! Repository for the `recorded_broadcasts` table.
//!
//! Besides CRUD this provides the curriculum lookups used by the player:
//! by class + subject, all broadcasts of a book, and the six-field
//! composite match.

use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::recorded_broadcast::{
    BroadcastLookup, CreateRecordedBroadcast, RecordedBroadcast, RecordedBroadcastFilter,
    UpdateRecordedBroadcast,
};

/// Column list for `recorded_broadcasts` queries.
const COLUMNS: &str = "\
    id, board_id, medium_id, class_id, subject_id, book_id, chapter_id, \
    studio, live_streaming_path, broadcast_date, broadcast_time, title, \
    broadcast_type, presenter_name, landscape_image, portrait_image, \
    created_at, updated_at";

/// `WHERE` clause shared by the list and count queries (`$1` = title).
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR title = $1)";

/// Provides CRUD and lookup operations for recorded broadcasts.
pub struct RecordedBroadcastRepo;

impl RecordedBroadcastRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new recorded broadcast, returning the created row.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateRecordedBroadcast,
    ) -> Result<RecordedBroadcast, sqlx::Error> {
        let query = format!(
            "INSERT INTO recorded_broadcasts \
                 (board_id, medium_id, class_id, subject_id, book_id, chapter_id, \
                  studio, live_streaming_path, broadcast_date, broadcast_time, title, \
                  broadcast_type, presenter_name, landscape_image, portrait_image) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecordedBroadcast>(&query)
            .bind(&dto.board_id)
            .bind(&dto.medium_id)
            .bind(&dto.class_id)
            .bind(&dto.subject_id)
            .bind(&dto.book_id)
            .bind(&dto.chapter_id)
            .bind(&dto.studio)
            .bind(&dto.live_streaming_path)
            .bind(&dto.broadcast_date)
            .bind(&dto.broadcast_time)
            .bind(&dto.title)
            .bind(&dto.broadcast_type)
            .bind(&dto.presenter_name)
            .bind(&dto.landscape_image)
            .bind(&dto.portrait_image)
            .fetch_one(pool)
            .await
    }

    /// List one page of recorded broadcasts matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &RecordedBroadcastFilter,
        page: &PageRequest,
    ) -> Result<Page<RecordedBroadcast>, sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM recorded_broadcasts {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.title)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM recorded_broadcasts {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            page.order_by()
        );
        let rows = sqlx::query_as::<_, RecordedBroadcast>(&query)
            .bind(&filter.title)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    /// Find a recorded broadcast by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecordedBroadcast>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recorded_broadcasts WHERE id = $1");
        sqlx::query_as::<_, RecordedBroadcast>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a recorded broadcast.
    ///
    /// Uses `COALESCE` so only provided fields are changed; image URLs are
    /// only replaced when a new upload produced them.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateRecordedBroadcast,
    ) -> Result<Option<RecordedBroadcast>, sqlx::Error> {
        let query = format!(
            "UPDATE recorded_broadcasts SET \
                 board_id = COALESCE($2, board_id), \
                 medium_id = COALESCE($3, medium_id), \
                 class_id = COALESCE($4, class_id), \
                 subject_id = COALESCE($5, subject_id), \
                 book_id = COALESCE($6, book_id), \
                 chapter_id = COALESCE($7, chapter_id), \
                 studio = COALESCE($8, studio), \
                 live_streaming_path = COALESCE($9, live_streaming_path), \
                 broadcast_date = COALESCE($10, broadcast_date), \
                 broadcast_time = COALESCE($11, broadcast_time), \
                 title = COALESCE($12, title), \
                 broadcast_type = COALESCE($13, broadcast_type), \
                 presenter_name = COALESCE($14, presenter_name), \
                 landscape_image = COALESCE($15, landscape_image), \
                 portrait_image = COALESCE($16, portrait_image) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecordedBroadcast>(&query)
            .bind(id)
            .bind(&dto.board_id)
            .bind(&dto.medium_id)
            .bind(&dto.class_id)
            .bind(&dto.subject_id)
            .bind(&dto.book_id)
            .bind(&dto.chapter_id)
            .bind(&dto.studio)
            .bind(&dto.live_streaming_path)
            .bind(&dto.broadcast_date)
            .bind(&dto.broadcast_time)
            .bind(&dto.title)
            .bind(&dto.broadcast_type)
            .bind(&dto.presenter_name)
            .bind(&dto.landscape_image)
            .bind(&dto.portrait_image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a recorded broadcast, returning its last state, or `None`.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecordedBroadcast>, sqlx::Error> {
        let query = format!("DELETE FROM recorded_broadcasts WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, RecordedBroadcast>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Curriculum lookups
    // -----------------------------------------------------------------------

    /// All broadcasts for a class + subject, oldest first.
    pub async fn list_by_class_subject(
        pool: &PgPool,
        class_id: &str,
        subject_id: &str,
    ) -> Result<Vec<RecordedBroadcast>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recorded_broadcasts \
             WHERE class_id = $1 AND subject_id = $2 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, RecordedBroadcast>(&query)
            .bind(class_id)
            .bind(subject_id)
            .fetch_all(pool)
            .await
    }

    /// All broadcasts of a book, oldest first. Callers group by chapter.
    pub async fn list_by_book(
        pool: &PgPool,
        book_id: &str,
    ) -> Result<Vec<RecordedBroadcast>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recorded_broadcasts \
             WHERE book_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, RecordedBroadcast>(&query)
            .bind(book_id)
            .fetch_all(pool)
            .await
    }

    /// The oldest broadcast matching all six curriculum coordinates.
    pub async fn find_by_lookup(
        pool: &PgPool,
        lookup: &BroadcastLookup,
    ) -> Result<Option<RecordedBroadcast>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recorded_broadcasts \
             WHERE board_id = $1 AND class_id = $2 AND subject_id = $3 \
               AND medium_id = $4 AND chapter_id = $5 AND book_id = $6 \
             ORDER BY created_at ASC, id ASC LIMIT 1"
        );
        sqlx::query_as::<_, RecordedBroadcast>(&query)
            .bind(&lookup.board_id)
            .bind(&lookup.class_id)
            .bind(&lookup.subject_id)
            .bind(&lookup.medium_id)
            .bind(&lookup.chapter_id)
            .bind(&lookup.book_id)
            .fetch_optional(pool)
            .await
    }
}
