//! Provider error taxonomy
//!
//! User-visible failures carry enough detail to point at the missing
//! credential or configuration; recognizable relay status codes map to
//! auth/quota-specific messaging.

use thiserror::Error;

/// Errors that can occur while processing text remotely
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Provider '{provider}' is not configured: {detail}")]
    ConfigMissing { provider: String, detail: String },

    #[error("Authentication failed (status {status}); check the configured API key")]
    AuthFailed { status: u16 },

    #[error("Rate limit or quota exceeded; try again later")]
    QuotaExceeded,

    #[error("Provider request failed (status {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Relay transport error: {0}")]
    Transport(String),

    #[error("Unexpected response format from provider")]
    MalformedResponse,
}

impl ProviderError {
    /// Map an HTTP status to the matching taxonomy entry
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => ProviderError::AuthFailed { status },
            429 => ProviderError::QuotaExceeded,
            _ => ProviderError::RequestFailed {
                status,
                message: message.into(),
            },
        }
    }
}
