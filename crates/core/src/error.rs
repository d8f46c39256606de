use serde::Serialize;
use utoipa::ToSchema;

use crate::types::DbId;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No record of `entity` exists with the given id.
    ///
    /// `entity` is the lowercase human-readable resource name; it is used
    /// verbatim in the client-facing message.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup by something other than the primary key matched nothing.
    #[error("{0}")]
    NoMatch(String),

    #[error("Validation failed: {}", summarize(.0))]
    InvalidFields(Vec<FieldViolation>),
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}
