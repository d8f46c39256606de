//! Helpers shared by request validation schemas.
//!
//! Request structs derive [`validator::Validate`]; [`validate`] turns the
//! resulting error tree into a flat, deterministically ordered list of
//! [`FieldViolation`]s.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{CoreError, FieldViolation};

/// Maximum length of an opaque reference id (board, class, subject, ...).
pub const MAX_REFERENCE_ID_LEN: usize = 64;

/// Field name used for struct-level (schema) violations.
pub const BODY_FIELD: &str = "body";

/// Run `Validate` and convert failures into [`CoreError::InvalidFields`].
pub fn validate<T: Validate>(value: &T) -> Result<(), CoreError> {
    value
        .validate()
        .map_err(|errors| CoreError::InvalidFields(violations(&errors)))
}

/// Flatten validator errors, sorted by field name. Field names are reported
/// in camelCase to match the JSON payloads.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = if field == "__all__" {
                BODY_FIELD.to_string()
            } else {
                camel_case(&field)
            };
            errs.iter()
                .map(move |e| FieldViolation::new(field.clone(), describe(e)))
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    out
}

/// `board_id` -> `boardId`.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("failed '{}' check", error.code),
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Opaque reference ids: 1..=64 characters of `[A-Za-z0-9_-]`.
pub fn reference_id(value: &str) -> Result<(), ValidationError> {
    let well_formed = !value.is_empty()
        && value.len() <= MAX_REFERENCE_ID_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(violation(
            "reference_id",
            "must be 1-64 characters of letters, digits, '_' or '-'",
        ))
    }
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(violation("not_blank", "must not be blank"))
    } else {
        Ok(())
    }
}

/// Error returned by update schemas whose payload carries no fields.
pub fn empty_update() -> ValidationError {
    violation("min_keys", "at least one field must be supplied")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"))]
        name: String,
        #[validate(custom(function = "reference_id"))]
        board_id: String,
        #[validate(range(min = 1, message = "must be at least 1"))]
        limit: i64,
    }

    #[test]
    fn reference_id_accepts_object_id_like_values() {
        assert!(reference_id("6516761d9cee04ae5df9fb6f").is_ok());
        assert!(reference_id("class-10_a").is_ok());
    }

    #[test]
    fn reference_id_rejects_malformed_values() {
        assert!(reference_id("").is_err());
        assert!(reference_id("has space").is_err());
        assert!(reference_id("../etc").is_err());
        assert!(reference_id(&"a".repeat(65)).is_err());
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("  ").is_err());
        assert!(not_blank("Physics").is_ok());
    }

    #[test]
    fn validate_collects_sorted_violations() {
        let sample = Sample {
            name: " ".into(),
            board_id: "bad id".into(),
            limit: 0,
        };
        let err = validate(&sample).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref v) if v.len() == 3);
        if let CoreError::InvalidFields(v) = err {
            let fields: Vec<&str> = v.iter().map(|f| f.field.as_str()).collect();
            assert_eq!(fields, vec!["boardId", "limit", "name"]);
            assert_eq!(v[1].message, "must be at least 1");
        }
    }

    #[test]
    fn camel_case_converts_snake_names() {
        assert_eq!(camel_case("presentator_name"), "presentatorName");
        assert_eq!(camel_case("limit"), "limit");
        assert_eq!(camel_case("__all__"), "all");
    }

    #[test]
    fn validate_passes_good_input() {
        let sample = Sample {
            name: "Section A".into(),
            board_id: "cbse".into(),
            limit: 10,
        };
        assert!(validate(&sample).is_ok());
    }
}
