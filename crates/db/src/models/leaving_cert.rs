//! Leaving certificate model and DTOs.

use chrono::NaiveDate;
use lms_core::error::CoreError;
use lms_core::pagination::{PageRequest, SortFields};
use lms_core::types::{nullable, DbId, Timestamp};
use lms_core::validation::{empty_update, not_blank};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Fields accepted by `sortBy` on the leaving certificate list endpoint.
pub const LEAVING_CERT_SORT_FIELDS: SortFields = &[
    ("id", "id"),
    ("applicantName", "applicant_name"),
    ("date", "issue_date"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// A row from the `leaving_certificates` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeavingCert {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub applicant_name: String,
    pub student_id: Option<String>,
    #[serde(rename = "date")]
    pub issue_date: Option<NaiveDate>,
    /// Whether the certificate is active.
    pub status: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for issuing a leaving certificate.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLeavingCert {
    #[validate(custom(function = "not_blank"))]
    pub applicant_name: String,
    #[validate(custom(function = "not_blank"))]
    pub student_id: Option<String>,
    #[serde(rename = "date")]
    pub issue_date: Option<NaiveDate>,
    /// Defaults to `true` when omitted.
    pub status: Option<bool>,
}

/// DTO for partially updating a leaving certificate.
///
/// `studentId` and `date` are nullable columns: sending `null` clears them,
/// leaving the key out keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_leaving_cert"))]
pub struct UpdateLeavingCert {
    #[validate(custom(function = "not_blank"))]
    pub applicant_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "not_blank"))]
    pub student_id: Option<Option<String>>,
    #[serde(rename = "date", default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub issue_date: Option<Option<NaiveDate>>,
    pub status: Option<bool>,
}

fn validate_update_leaving_cert(dto: &UpdateLeavingCert) -> Result<(), ValidationError> {
    let any = dto.applicant_name.is_some()
        || dto.student_id.is_some()
        || dto.issue_date.is_some()
        || dto.status.is_some();
    if !any {
        return Err(empty_update());
    }
    Ok(())
}

/// Exact-match filter for listing leaving certificates.
#[derive(Debug, Clone, Default)]
pub struct LeavingCertFilter {
    pub applicant_name: Option<String>,
    pub status: Option<bool>,
}

/// Query parameters for `GET /leavingcert`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct LeavingCertListParams {
    pub applicant_name: Option<String>,
    pub status: Option<bool>,
    pub sort_by: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<i64>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: Option<i64>,
}

impl LeavingCertListParams {
    pub fn filter(&self) -> LeavingCertFilter {
        LeavingCertFilter {
            applicant_name: self.applicant_name.clone(),
            status: self.status,
        }
    }

    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(
            self.sort_by.as_deref(),
            self.limit,
            self.page,
            LEAVING_CERT_SORT_FIELDS,
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use lms_core::validation::validate;

    use super::*;

    fn update(json: &str) -> UpdateLeavingCert {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn explicit_null_is_a_supplied_field() {
        let dto = update(r#"{"studentId":null,"date":null}"#);
        assert_eq!(dto.student_id, Some(None));
        assert_eq!(dto.issue_date, Some(None));
        assert!(validate(&dto).is_ok());
    }

    #[test]
    fn absent_keys_stay_unset() {
        let dto = update(r#"{"status":false}"#);
        assert_eq!(dto.student_id, None);
        assert_eq!(dto.issue_date, None);
    }

    #[test]
    fn empty_update_and_blank_student_id_are_rejected() {
        assert!(validate(&update("{}")).is_err());
        assert_matches!(
            validate(&update(r#"{"studentId":"  "}"#)),
            Err(CoreError::InvalidFields(v)) if v[0].field == "studentId"
        );
    }
}
