//! Error types for the storage layer

use thiserror::Error;

/// Errors that can occur in the key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[from] quillkey_common::JsonStoreError),

    #[error("Key not found: {0}")]
    KeyNotFound(String),
}
