//! Provider credential settings
//!
//! One stored document holds the shared translation provider configuration
//! and per-provider LLM endpoint credentials. Preset documents reference
//! providers by name; this document supplies the endpoint and key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use quillkey_providers::{LlmConfig, ProviderConfig, ProviderError};

/// Storage key for the provider settings document
pub const PROVIDER_SETTINGS_KEY: &str = "provider_settings";

/// Endpoint credentials for one LLM provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmProviderSettings {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Shared translation backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSettings {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl TranslationSettings {
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}

/// The persisted provider settings document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationSettings>,
    #[serde(default)]
    pub llm_providers: HashMap<String, LlmProviderSettings>,
}

/// Well-known endpoint for providers the user has not configured a URL for
fn known_base_url(provider: &str) -> Option<&'static str> {
    match provider {
        "openai" => Some("https://api.openai.com/v1"),
        _ => None,
    }
}

impl ProviderSettings {
    /// Resolve the endpoint configuration for an LLM-prompt preset.
    ///
    /// The preset supplies the model; this document supplies the endpoint.
    pub fn llm_config(&self, provider: &str, model: &str) -> Result<LlmConfig, ProviderError> {
        let stored = self.llm_providers.get(provider);
        let base_url = stored
            .map(|s| s.base_url.clone())
            .filter(|u| !u.is_empty())
            .or_else(|| known_base_url(provider).map(String::from))
            .ok_or_else(|| ProviderError::ConfigMissing {
                provider: provider.to_string(),
                detail: "no endpoint configured".to_string(),
            })?;
        Ok(LlmConfig {
            base_url,
            api_key: stored.and_then(|s| s.api_key.clone()),
            model: model.to_string(),
        })
    }
}
