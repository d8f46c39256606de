//! Repository for the `sections` table.

use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::section::{CreateSection, Section, SectionFilter, UpdateSection};

/// Column list for `sections` queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// `WHERE` clause shared by the list and count queries (`$1` = name).
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR name = $1)";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section, returning the created row.
    pub async fn create(pool: &PgPool, dto: &CreateSection) -> Result<Section, sqlx::Error> {
        let query = format!("INSERT INTO sections (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Section>(&query)
            .bind(&dto.name)
            .fetch_one(pool)
            .await
    }

    /// List one page of sections matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &SectionFilter,
        page: &PageRequest,
    ) -> Result<Page<Section>, sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM sections {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.name)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM sections {FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            page.order_by()
        );
        let rows = sqlx::query_as::<_, Section>(&query)
            .bind(&filter.name)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    /// Find a section by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a section.
    ///
    /// Uses `COALESCE` so only provided fields are changed. Returns `None`
    /// if no row exists with the given ID.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET name = COALESCE($2, name) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(&dto.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a section, returning its last state, or `None` if absent.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("DELETE FROM sections WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
