/// Errors raised by an [`ObjectStore`](crate::ObjectStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key is empty, absolute, or escapes the store root.
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote backend rejected or failed the request.
    #[error("Object store request failed: {0}")]
    Backend(String),
}
