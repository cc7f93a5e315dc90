//! Error types for shortcut parsing and normalization

use thiserror::Error;

/// Errors that can occur while normalizing a shortcut string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcutError {
    #[error("Shortcut is empty")]
    Empty,

    #[error("Key-only shortcut '{0}' is not allowed; at least one modifier is required")]
    KeyWithoutModifier(String),

    #[error("Shortcut '{0}' has more than two non-modifier keys")]
    TooManyKeys(String),

    #[error("Shortcut '{0}' has no non-modifier key; preset shortcuts need at least one")]
    ModifierOnly(String),
}
