//! Object storage for uploaded media.
//!
//! Handlers never talk to a storage backend directly. They go through the
//! [`ObjectStore`] trait, which has two implementations:
//!
//! - [`S3ObjectStore`] for S3 and S3-compatible endpoints (production).
//! - [`LocalObjectStore`] writing under a local directory (development, tests).
//!
//! Both return the public URL that gets persisted on the record.

pub mod error;
pub mod key;
pub mod local;
pub mod s3;

use async_trait::async_trait;

pub use error::StorageError;
pub use key::object_key;
pub use local::LocalObjectStore;
pub use s3::{S3Config, S3ObjectStore};

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Key the object was written under.
    pub key: String,
    /// Publicly resolvable URL of the object.
    pub url: String,
}

/// A write-only blob store addressed by key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing object.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<StoredObject, StorageError>;

    /// The public URL an object stored under `key` is served from.
    fn public_url(&self, key: &str) -> String;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Join a base URL and an object key with exactly one `/` between them.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}
