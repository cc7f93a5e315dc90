//! Error types for preset operations

use thiserror::Error;

use quillkey_shortcuts::ShortcutError;
use quillkey_storage::StorageError;

/// Errors that can occur while managing presets
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Invalid shortcut: {0}")]
    InvalidShortcut(#[from] ShortcutError),

    #[error("Shortcut '{shortcut}' is already used by preset '{existing}'")]
    DuplicateShortcut { shortcut: String, existing: String },

    #[error("Preset not found: {0}")]
    NotFound(String),

    #[error("Cannot delete the only remaining preset")]
    LastPreset,

    #[error("Custom transformation not found: {0}")]
    TransformNotFound(String),

    #[error("Maximum of {0} custom transformations reached")]
    TransformLimitReached(usize),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
