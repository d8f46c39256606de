//! Repository for the `leaving_certificates` table.

use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::leaving_cert::{
    CreateLeavingCert, LeavingCert, LeavingCertFilter, UpdateLeavingCert,
};

/// Column list for `leaving_certificates` queries.
const COLUMNS: &str = "\
    id, applicant_name, student_id, issue_date, status, created_at, updated_at";

/// `WHERE` clause shared by the list and count queries
/// (`$1` = applicant_name, `$2` = status).
const FILTER: &str = "\
    WHERE ($1::TEXT IS NULL OR applicant_name = $1) \
      AND ($2::BOOLEAN IS NULL OR status = $2)";

/// Provides CRUD operations for leaving certificates.
pub struct LeavingCertRepo;

impl LeavingCertRepo {
    /// Insert a new certificate. `status` defaults to `true`.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateLeavingCert,
    ) -> Result<LeavingCert, sqlx::Error> {
        let query = format!(
            "INSERT INTO leaving_certificates (applicant_name, student_id, issue_date, status) \
             VALUES ($1, $2, $3, COALESCE($4, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeavingCert>(&query)
            .bind(&dto.applicant_name)
            .bind(&dto.student_id)
            .bind(dto.issue_date)
            .bind(dto.status)
            .fetch_one(pool)
            .await
    }

    /// List one page of certificates matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &LeavingCertFilter,
        page: &PageRequest,
    ) -> Result<Page<LeavingCert>, sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM leaving_certificates {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.applicant_name)
            .bind(filter.status)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM leaving_certificates {FILTER} \
             ORDER BY {} LIMIT $3 OFFSET $4",
            page.order_by()
        );
        let rows = sqlx::query_as::<_, LeavingCert>(&query)
            .bind(&filter.applicant_name)
            .bind(filter.status)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(rows, page, total))
    }

    /// Find a certificate by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LeavingCert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leaving_certificates WHERE id = $1");
        sqlx::query_as::<_, LeavingCert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a certificate. Nullable columns are written when
    /// their key was present, so an explicit `null` clears them.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateLeavingCert,
    ) -> Result<Option<LeavingCert>, sqlx::Error> {
        let query = format!(
            "UPDATE leaving_certificates SET \
                 applicant_name = COALESCE($2, applicant_name), \
                 student_id = CASE WHEN $3 THEN $4 ELSE student_id END, \
                 issue_date = CASE WHEN $5 THEN $6 ELSE issue_date END, \
                 status = COALESCE($7, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeavingCert>(&query)
            .bind(id)
            .bind(&dto.applicant_name)
            .bind(dto.student_id.is_some())
            .bind(dto.student_id.as_ref().and_then(Option::as_deref))
            .bind(dto.issue_date.is_some())
            .bind(dto.issue_date.flatten())
            .bind(dto.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a certificate, returning its last state, or `None` if absent.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<LeavingCert>, sqlx::Error> {
        let query = format!("DELETE FROM leaving_certificates WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, LeavingCert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
