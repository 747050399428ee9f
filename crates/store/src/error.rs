use thiserror::Error;

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed to complete the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
