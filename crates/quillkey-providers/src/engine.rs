//! Translation engine and provider factory
//!
//! The engine holds the configured provider behind a tokio mutex and
//! initializes it lazily. A setup failure is captured rather than
//! propagated at configuration time so presets that never translate keep
//! working; the error resurfaces on the first translation attempt.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::deepl::DeepLProvider;
use crate::error::ProviderError;
use crate::llm::LlmConfig;
use crate::openai::OpenAiCompatibleProvider;
use crate::relay::FetchRelay;
use crate::translate::{TranslationProvider, TranslationRequest};

/// Settings for one translation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Backend identifier, "deepl" or "openai-compatible"
    pub provider: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Build a provider from its configuration
pub fn create_provider(
    relay: Arc<dyn FetchRelay>,
    config: &ProviderConfig,
) -> Result<Box<dyn TranslationProvider>, ProviderError> {
    match config.provider.as_str() {
        "deepl" => {
            let api_key = config.api_key.clone().ok_or_else(|| ProviderError::ConfigMissing {
                provider: "deepl".to_string(),
                detail: "API key is required".to_string(),
            })?;
            Ok(Box::new(DeepLProvider::new(relay, api_key)))
        }
        "openai-compatible" => {
            let base_url = config
                .base_url
                .clone()
                .ok_or_else(|| ProviderError::ConfigMissing {
                    provider: "openai-compatible".to_string(),
                    detail: "base URL is required".to_string(),
                })?;
            let model = config.model.clone().ok_or_else(|| ProviderError::ConfigMissing {
                provider: "openai-compatible".to_string(),
                detail: "model is required".to_string(),
            })?;
            Ok(Box::new(OpenAiCompatibleProvider::new(
                relay,
                LlmConfig {
                    base_url,
                    api_key: config.api_key.clone(),
                    model,
                },
            )))
        }
        other => Err(ProviderError::ConfigMissing {
            provider: other.to_string(),
            detail: "unknown provider".to_string(),
        }),
    }
}

enum EngineState {
    Unconfigured,
    Ready(Box<dyn TranslationProvider>),
    Failed(ProviderError),
}

/// Routes translation requests to the configured provider
pub struct TranslationEngine {
    relay: Arc<dyn FetchRelay>,
    state: Mutex<EngineState>,
}

impl TranslationEngine {
    pub fn new(relay: Arc<dyn FetchRelay>) -> Self {
        TranslationEngine {
            relay,
            state: Mutex::new(EngineState::Unconfigured),
        }
    }

    /// Swap in a provider built from fresh settings. The previous provider
    /// is destroyed. Failures are held and reported on the next use.
    pub async fn reconfigure(&self, config: &ProviderConfig) {
        let mut state = self.state.lock().await;
        if let EngineState::Ready(provider) = &mut *state {
            provider.destroy();
        }
        *state = match create_provider(self.relay.clone(), config) {
            Ok(mut provider) => match provider.initialize().await {
                Ok(()) => {
                    debug!(provider = %config.provider, "translation provider ready");
                    EngineState::Ready(provider)
                }
                Err(e) => {
                    warn!(provider = %config.provider, error = %e, "provider initialization failed");
                    EngineState::Failed(e)
                }
            },
            Err(e) => {
                warn!(provider = %config.provider, error = %e, "provider configuration rejected");
                EngineState::Failed(e)
            }
        };
    }

    pub async fn translate(
        &self,
        text: &str,
        request: &TranslationRequest,
    ) -> Result<String, ProviderError> {
        let state = self.state.lock().await;
        match &*state {
            EngineState::Ready(provider) => provider.translate_text(text, request).await,
            EngineState::Failed(e) => Err(e.clone()),
            EngineState::Unconfigured => Err(ProviderError::ConfigMissing {
                provider: "translation".to_string(),
                detail: "no translation provider configured".to_string(),
            }),
        }
    }

    /// Translate through a transient provider built from per-preset
    /// settings, leaving the configured provider untouched.
    pub async fn translate_with_override(
        &self,
        text: &str,
        request: &TranslationRequest,
        config: &ProviderConfig,
    ) -> Result<String, ProviderError> {
        let mut provider = create_provider(self.relay.clone(), config)?;
        provider.initialize().await?;
        let result = provider.translate_text(text, request).await;
        provider.destroy();
        result
    }
}
