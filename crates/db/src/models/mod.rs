//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//! - The list query parameters and filter accepted by the list endpoint
//!
//! Entities serialize with camelCase keys; request DTOs reject unknown keys.

pub mod book;
pub mod leaving_cert;
pub mod presentator;
pub mod recorded_broadcast;
pub mod section;
