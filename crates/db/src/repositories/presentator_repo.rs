//! Repository for the `presentators` table.

use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::presentator::{
    CreatePresentator, Presentator, PresentatorFilter, UpdatePresentator,
};

/// Column list for `presentators` queries.
const COLUMNS: &str = "\
    id, presentator_name, presentator_type, presentator_bio, photo, \
    created_at, updated_at";

/// `WHERE` clause shared by the list and count queries (`$1` = name).
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR presentator_name = $1)";

/// Provides CRUD operations for presentators.
pub struct PresentatorRepo;

impl PresentatorRepo {
    /// Insert a new presentator, returning the created row.
    pub async fn create(
        pool: &PgPool,
        dto: &CreatePresentator,
    ) -> Result<Presentator, sqlx::Error> {
        let query = format!(
            "INSERT INTO presentators \
                 (presentator_name, presentator_type, presentator_bio, photo) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Presentator>(&query)
            .bind(&dto.presentator_name)
            .bind(&dto.presentator_type)
            .bind(&dto.presentator_bio)
            .bind(&dto.photo)
            .fetch_one(pool)
            .await
    }

    /// List one page of presentators matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &PresentatorFilter,
        page: &PageRequest,
    ) -> Result<Page<Presentator>, sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM presentators {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.presentator_name)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM presentators {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            page.order_by()
        );
        let rows = sqlx::query_as::<_, Presentator>(&query)
            .bind(&filter.presentator_name)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    /// Find a presentator by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Presentator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presentators WHERE id = $1");
        sqlx::query_as::<_, Presentator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a presentator. `photo` is only replaced when a new
    /// URL is supplied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdatePresentator,
    ) -> Result<Option<Presentator>, sqlx::Error> {
        let query = format!(
            "UPDATE presentators SET \
                 presentator_name = COALESCE($2, presentator_name), \
                 presentator_type = COALESCE($3, presentator_type), \
                 presentator_bio = COALESCE($4, presentator_bio), \
                 photo = COALESCE($5, photo) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Presentator>(&query)
            .bind(id)
            .bind(&dto.presentator_name)
            .bind(&dto.presentator_type)
            .bind(&dto.presentator_bio)
            .bind(&dto.photo)
            .fetch_optional(pool)
            .await
    }

    /// Delete a presentator, returning its last state, or `None` if absent.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Presentator>, sqlx::Error> {
        let query = format!("DELETE FROM presentators WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Presentator>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
