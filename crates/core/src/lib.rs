//! Domain types shared by the persistence and HTTP layers.
//!
//! Zero internal dependencies so that repositories, services and handlers
//! can all depend on it.

pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
