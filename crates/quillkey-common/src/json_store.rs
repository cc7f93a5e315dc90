//! JSON persistence helpers
//!
//! Small load/save wrappers shared by the file-backed settings store so the
//! serialization and IO error handling lives in one place.

use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use thiserror::Error;

/// JSON store errors
#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("File not found: {path}")]
    NotFound { path: String },
}

/// Load JSON from a file path
pub fn load_json<T, P>(path: P) -> Result<T, JsonStoreError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(JsonStoreError::NotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Load JSON from file, returning the type's default if the file doesn't exist
pub fn load_json_or_default<T, P>(path: P) -> Result<T, JsonStoreError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    match load_json(path) {
        Ok(value) => Ok(value),
        Err(JsonStoreError::NotFound { .. }) => Ok(T::default()),
        Err(e) => Err(e),
    }
}

/// Save a value as pretty-printed JSON, creating parent directories as needed
pub fn save_json<T, P>(path: P, value: &T) -> Result<(), JsonStoreError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}
