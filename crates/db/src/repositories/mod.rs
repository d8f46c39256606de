//! Repository layer: one static-method struct per table.
//!
//! Every repository takes a `&PgPool` and returns `sqlx::Error` unchanged;
//! absence is reported as `Option`, never as an error.

pub mod book_repo;
pub mod leaving_cert_repo;
pub mod presentator_repo;
pub mod recorded_broadcast_repo;
pub mod section_repo;

pub use book_repo::BookRepo;
pub use leaving_cert_repo::LeavingCertRepo;
pub use presentator_repo::PresentatorRepo;
pub use recorded_broadcast_repo::RecordedBroadcastRepo;
pub use section_repo::SectionRepo;
