//! Engine error taxonomy
//!
//! Everything a trigger can fail with, folded into one enum so the
//! notifier has a single user-facing message per failure.

use thiserror::Error;

use quillkey_insertion::InsertionError;
use quillkey_presets::PresetError;
use quillkey_providers::ProviderError;
use quillkey_storage::StorageError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No editable text field or selection is focused")]
    NoEditableTarget,

    #[error("Nothing to process: the target is empty")]
    NoText,

    #[error("A rewrite is already in progress")]
    Busy,

    #[error("No preset is available to trigger")]
    NoPreset,

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Insertion(#[from] InsertionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
