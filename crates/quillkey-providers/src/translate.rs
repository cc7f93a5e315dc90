//! Translation provider contract

use async_trait::async_trait;

use crate::error::ProviderError;

/// A single translation call
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub target_language: String,
    /// `None` or "auto" lets the provider detect the source
    pub source_language: Option<String>,
}

impl TranslationRequest {
    pub fn new(target_language: impl Into<String>) -> Self {
        TranslationRequest {
            target_language: target_language.into(),
            source_language: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        if source != "auto" && !source.is_empty() {
            self.source_language = Some(source);
        }
        self
    }
}

/// Result of a credential/configuration check
#[derive(Debug, Clone)]
pub struct Validation {
    pub valid: bool,
    pub error: Option<String>,
}

impl Validation {
    pub fn ok() -> Self {
        Validation { valid: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Validation {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Backend capable of translating text
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Prepare the provider; called once before the first translation
    async fn initialize(&mut self) -> Result<(), ProviderError>;

    async fn translate_text(
        &self,
        text: &str,
        request: &TranslationRequest,
    ) -> Result<String, ProviderError>;

    /// Check the configured credentials without mutating state
    async fn validate(&self) -> Validation;

    /// Release any held resources
    fn destroy(&mut self) {}
}
