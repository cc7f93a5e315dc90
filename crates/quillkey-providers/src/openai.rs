//! Translation through any OpenAI-compatible chat endpoint

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ProviderError;
use crate::llm::{LlmConfig, LlmExecutor};
use crate::relay::FetchRelay;
use crate::translate::{TranslationProvider, TranslationRequest, Validation};

/// Chat-completions backend reused for translation
pub struct OpenAiCompatibleProvider {
    executor: LlmExecutor,
    config: LlmConfig,
}

impl OpenAiCompatibleProvider {
    pub fn new(relay: Arc<dyn FetchRelay>, config: LlmConfig) -> Self {
        OpenAiCompatibleProvider {
            executor: LlmExecutor::new(relay),
            config,
        }
    }

    fn translation_prompt(request: &TranslationRequest) -> String {
        match &request.source_language {
            Some(source) => format!(
                "Translate the following text from {source} to {}:\n\n{{{{input}}}}",
                request.target_language
            ),
            None => format!(
                "Translate the following text to {}. Detect the source language automatically:\n\n{{{{input}}}}",
                request.target_language
            ),
        }
    }
}

#[async_trait]
impl TranslationProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn initialize(&mut self) -> Result<(), ProviderError> {
        if self.config.base_url.is_empty() {
            return Err(ProviderError::ConfigMissing {
                provider: self.name().to_string(),
                detail: "base URL is empty".to_string(),
            });
        }
        if self.config.model.is_empty() {
            return Err(ProviderError::ConfigMissing {
                provider: self.name().to_string(),
                detail: "model is empty".to_string(),
            });
        }
        Ok(())
    }

    async fn translate_text(
        &self,
        text: &str,
        request: &TranslationRequest,
    ) -> Result<String, ProviderError> {
        // Nothing to do when source and target already match
        if request.source_language.as_deref() == Some(request.target_language.as_str()) {
            debug!(target = %request.target_language, "source matches target, skipping");
            return Ok(text.to_string());
        }
        let prompt = Self::translation_prompt(request);
        self.executor.execute(&prompt, text, &self.config).await
    }

    async fn validate(&self) -> Validation {
        if self.config.base_url.is_empty() || self.config.model.is_empty() {
            return Validation::failed("base URL and model are required");
        }
        let probe = TranslationRequest::new("en");
        match self.translate_text("hello", &probe).await {
            Ok(_) => Validation::ok(),
            Err(e) => Validation::failed(e.to_string()),
        }
    }
}
