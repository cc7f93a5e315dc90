//! Error types for the insertion cascade

use thiserror::Error;

/// Errors that can occur while writing text into a surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertionError {
    #[error("All insertion strategies failed verification")]
    VerificationFailed,
}
