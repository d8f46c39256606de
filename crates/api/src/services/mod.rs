//! Business logic between handlers and repositories.
//!
//! Each service is a thin borrow of the connection pool, built per request
//! from `AppState`. Single-record reads return `Option` and leave the
//! not-found decision to the caller; update and delete treat a missing row as
//! [`ServiceError::NotFound`].

pub mod book;
pub mod leaving_cert;
pub mod presentator;
pub mod recorded_broadcast;
pub mod section;

use lms_core::types::DbId;

pub use book::BookService;
pub use leaving_cert::LeavingCertService;
pub use presentator::PresentatorService;
pub use recorded_broadcast::RecordedBroadcastService;
pub use section::SectionService;

/// Errors raised by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No record of `entity` exists with the given id.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Turn the `Option` a mutating repository call returns into a result.
pub(crate) fn found<T>(row: Option<T>, entity: &'static str, id: DbId) -> ServiceResult<T> {
    row.ok_or(ServiceError::NotFound { entity, id })
}
