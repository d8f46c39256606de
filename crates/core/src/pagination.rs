//! Page-based listing shared by every resource.
//!
//! A list request carries `sortBy`, `limit` and `page`. Sorting is restricted
//! to a per-resource allow-list mapping public (camelCase) field names to
//! database columns, so the generated `ORDER BY` only ever contains known
//! column identifiers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{CoreError, FieldViolation};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default number of records per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum number of records per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Column used when the caller does not ask for a specific order.
pub const DEFAULT_SORT_COLUMN: &str = "created_at";

/// Allow-list of sortable fields: `(public field name, column name)`.
pub type SortFields = &'static [(&'static str, &'static str)];

// ---------------------------------------------------------------------------
// Sort parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// Parse a `sortBy` value such as `"title:desc,createdAt:asc"`.
///
/// A criterion without a direction sorts ascending. An absent or blank value
/// yields the default order (`created_at ASC`).
pub fn parse_sort_by(raw: Option<&str>, allowed: SortFields) -> Result<Vec<SortKey>, CoreError> {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => {
            return Ok(vec![SortKey {
                column: DEFAULT_SORT_COLUMN,
                direction: SortDirection::Asc,
            }])
        }
    };

    let mut keys = Vec::new();
    for criterion in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let (field, direction) = match criterion.split_once(':') {
            Some((field, dir)) => (field.trim(), parse_direction(dir.trim())?),
            None => (criterion, SortDirection::Asc),
        };

        let column = allowed
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
            .ok_or_else(|| {
                let known: Vec<&str> = allowed.iter().map(|(name, _)| *name).collect();
                CoreError::InvalidFields(vec![FieldViolation::new(
                    "sortBy",
                    format!("cannot sort by '{field}'; allowed: {}", known.join(", ")),
                )])
            })?;

        keys.push(SortKey { column, direction });
    }

    Ok(keys)
}

fn parse_direction(dir: &str) -> Result<SortDirection, CoreError> {
    match dir.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortDirection::Asc),
        "desc" => Ok(SortDirection::Desc),
        other => Err(CoreError::InvalidFields(vec![FieldViolation::new(
            "sortBy",
            format!("unknown sort direction '{other}'; expected 'asc' or 'desc'"),
        )])),
    }
}

/// Render sort keys as an SQL `ORDER BY` body, with `id` as the final
/// tie-breaker so page boundaries are stable.
pub fn order_by_clause(keys: &[SortKey]) -> String {
    let mut parts: Vec<String> = keys
        .iter()
        .map(|k| format!("{} {}", k.column, k.direction.as_sql()))
        .collect();
    if !keys.iter().any(|k| k.column == "id") {
        parts.push("id ASC".to_string());
    }
    parts.join(", ")
}

// ---------------------------------------------------------------------------
// Page request / envelope
// ---------------------------------------------------------------------------

/// Clamp a user-provided limit to `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// `ceil(total_results / limit)`; zero results means zero pages.
pub fn total_pages(total_results: i64, limit: i64) -> i64 {
    if total_results <= 0 || limit <= 0 {
        return 0;
    }
    (total_results + limit - 1) / limit
}

/// A resolved list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub sort: Vec<SortKey>,
    pub limit: i64,
    pub page: i64,
}

impl PageRequest {
    pub fn new(
        sort_by: Option<&str>,
        limit: Option<i64>,
        page: Option<i64>,
        allowed: SortFields,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            sort: parse_sort_by(sort_by, allowed)?,
            limit: clamp_limit(limit),
            page: clamp_page(page),
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn order_by(&self) -> String {
        order_by_clause(&self.sort)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            sort: vec![SortKey {
                column: DEFAULT_SORT_COLUMN,
                direction: SortDirection::Asc,
            }],
            limit: DEFAULT_PAGE_LIMIT,
            page: 1,
        }
    }
}

/// Paginated envelope returned by every list endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub total_results: i64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, request: &PageRequest, total_results: i64) -> Self {
        Self {
            results,
            page: request.page,
            limit: request.limit,
            total_pages: total_pages(total_results, request.limit),
            total_results,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const FIELDS: SortFields = &[
        ("title", "title"),
        ("createdAt", "created_at"),
        ("presenterName", "presenter_name"),
    ];

    #[test]
    fn default_sort_is_created_at_ascending() {
        let keys = parse_sort_by(None, FIELDS).unwrap();
        assert_eq!(
            keys,
            vec![SortKey {
                column: "created_at",
                direction: SortDirection::Asc
            }]
        );
        assert_eq!(parse_sort_by(Some("  "), FIELDS).unwrap(), keys);
    }

    #[test]
    fn parses_multiple_criteria_and_maps_columns() {
        let keys = parse_sort_by(Some("presenterName:desc, title"), FIELDS).unwrap();
        assert_eq!(keys[0].column, "presenter_name");
        assert_eq!(keys[0].direction, SortDirection::Desc);
        assert_eq!(keys[1].column, "title");
        assert_eq!(keys[1].direction, SortDirection::Asc);
    }

    #[test]
    fn rejects_unknown_field() {
        let err = parse_sort_by(Some("password:asc"), FIELDS).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref v) if v[0].field == "sortBy");
    }

    #[test]
    fn rejects_unknown_direction() {
        let err = parse_sort_by(Some("title:sideways"), FIELDS).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(_));
    }

    #[test]
    fn order_by_appends_id_tiebreaker() {
        let keys = parse_sort_by(Some("title:desc"), FIELDS).unwrap();
        assert_eq!(order_by_clause(&keys), "title DESC, id ASC");
    }

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 3), 9);
    }

    #[test]
    fn clamp_limit_applies_default_and_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), MAX_PAGE_LIMIT);
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let req = PageRequest::new(None, Some(5), Some(3), FIELDS).unwrap();
        assert_eq!(req.offset(), 10);
        assert_eq!(PageRequest::default().offset(), 0);
    }

    #[test]
    fn page_envelope_reports_totals() {
        let req = PageRequest::new(None, Some(4), Some(9), FIELDS).unwrap();
        let page: Page<u8> = Page::new(Vec::new(), &req, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_results, 10);
        assert_eq!(page.page, 9);
        assert!(page.results.is_empty());
    }
}
