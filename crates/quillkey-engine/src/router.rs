//! Per-preset processing dispatch
//!
//! The router turns captured text into output text. It is the only place
//! that knows which preset kind needs which backend; the engine above it
//! only sees text in, text out.

use std::sync::Arc;

use tracing::debug;

use quillkey_presets::{CustomTransformService, Preset, PresetKind, ProviderOverride};
use quillkey_providers::{
    FetchRelay, LlmExecutor, ProviderConfig, TranslationEngine, TranslationRequest,
};
use quillkey_storage::{get_doc, KeyValueStore};
use quillkey_transforms::{apply_char_map, transform};

use crate::error::EngineError;
use crate::settings::{ProviderSettings, PROVIDER_SETTINGS_KEY};

fn override_config(o: &ProviderOverride) -> ProviderConfig {
    ProviderConfig {
        provider: o.provider.clone(),
        base_url: o.base_url.clone(),
        api_key: o.api_key.clone(),
        model: o.model.clone(),
    }
}

/// Dispatches a preset's processing to the matching backend
pub struct ProcessingRouter {
    store: Arc<dyn KeyValueStore>,
    custom: CustomTransformService,
    translation: Arc<TranslationEngine>,
    llm: LlmExecutor,
}

impl ProcessingRouter {
    pub fn new(store: Arc<dyn KeyValueStore>, relay: Arc<dyn FetchRelay>) -> Self {
        ProcessingRouter {
            custom: CustomTransformService::new(store.clone()),
            translation: Arc::new(TranslationEngine::new(relay.clone())),
            llm: LlmExecutor::new(relay),
            store,
        }
    }

    fn provider_settings(&self) -> Result<ProviderSettings, EngineError> {
        Ok(get_doc::<ProviderSettings>(self.store.as_ref(), PROVIDER_SETTINGS_KEY)?.unwrap_or_default())
    }

    /// Rebuild the shared translation provider from stored settings.
    /// Called at startup and whenever the settings document changes.
    pub async fn reload(&self) -> Result<(), EngineError> {
        if let Some(translation) = &self.provider_settings()?.translation {
            self.translation
                .reconfigure(&translation.to_provider_config())
                .await;
        }
        Ok(())
    }

    pub async fn process(&self, preset: &Preset, text: &str) -> Result<String, EngineError> {
        debug!(preset = %preset.display_name, chars = text.chars().count(), "processing");
        match &preset.kind {
            PresetKind::StaticTransform { style } => Ok(transform(text, *style)),
            PresetKind::CustomTransform { transform_id } => {
                let custom = self.custom.get(transform_id)?;
                Ok(apply_char_map(text, &custom.char_map))
            }
            PresetKind::Translation {
                source_language,
                target_language,
                provider_override,
            } => {
                let request =
                    TranslationRequest::new(target_language).with_source(source_language);
                let result = match provider_override {
                    Some(o) => {
                        self.translation
                            .translate_with_override(text, &request, &override_config(o))
                            .await?
                    }
                    None => self.translation.translate(text, &request).await?,
                };
                Ok(result)
            }
            PresetKind::LlmPrompt {
                prompt,
                provider,
                model,
            } => {
                let config = self.provider_settings()?.llm_config(provider, model)?;
                Ok(self.llm.execute(prompt, text, &config).await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LlmProviderSettings;
    use async_trait::async_trait;
    use quillkey_presets::PresetError;
    use quillkey_providers::{ProviderError, RelayData, RelayRequest};
    use quillkey_storage::{set_doc, MemoryStore};
    use quillkey_transforms::StyleId;

    struct MockRelay {
        response: serde_json::Value,
    }

    #[async_trait]
    impl FetchRelay for MockRelay {
        async fn fetch(&self, _request: RelayRequest) -> Result<RelayData, ProviderError> {
            Ok(RelayData::Json(self.response.clone()))
        }
    }

    fn router_with(response: serde_json::Value) -> (ProcessingRouter, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let router = ProcessingRouter::new(store.clone(), Arc::new(MockRelay { response }));
        (router, store)
    }

    #[tokio::test]
    async fn test_static_transform_needs_no_backend() {
        let (router, _store) = router_with(serde_json::json!({}));
        let preset = Preset::new(
            "Rot",
            "Ctrl+Alt+R",
            PresetKind::StaticTransform {
                style: StyleId::Rot13,
            },
        );
        assert_eq!(router.process(&preset, "Hello").await.unwrap(), "Uryyb");
    }

    #[tokio::test]
    async fn test_stale_custom_transform_reference() {
        let (router, _store) = router_with(serde_json::json!({}));
        let preset = Preset::new(
            "Gone",
            "",
            PresetKind::CustomTransform {
                transform_id: "missing".to_string(),
            },
        );
        let err = router.process(&preset, "x").await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Preset(PresetError::TransformNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_llm_prompt_uses_stored_credentials() {
        let (router, store) = router_with(serde_json::json!({
            "choices": [{"message": {"content": "rewritten"}}]
        }));
        let mut settings = ProviderSettings::default();
        settings.llm_providers.insert(
            "local".to_string(),
            LlmProviderSettings {
                base_url: "http://localhost:11434/v1".to_string(),
                api_key: None,
            },
        );
        set_doc(store.as_ref(), PROVIDER_SETTINGS_KEY, &settings).unwrap();

        let preset = Preset::new(
            "Rewrite",
            "",
            PresetKind::LlmPrompt {
                prompt: "Rewrite: {{input}}".to_string(),
                provider: "local".to_string(),
                model: "llama3".to_string(),
            },
        );
        assert_eq!(router.process(&preset, "hi").await.unwrap(), "rewritten");
    }

    #[tokio::test]
    async fn test_translation_without_configuration_fails() {
        let (router, _store) = router_with(serde_json::json!({}));
        let preset = Preset::new(
            "Translate",
            "",
            PresetKind::Translation {
                source_language: "auto".to_string(),
                target_language: "en".to_string(),
                provider_override: None,
            },
        );
        let err = router.process(&preset, "hola").await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Provider(ProviderError::ConfigMissing { .. })
        ));
    }

    #[tokio::test]
    async fn test_translation_override_builds_transient_provider() {
        let (router, _store) = router_with(serde_json::json!({
            "translations": [{"text": "hello", "detected_source_language": "ES"}]
        }));
        let preset = Preset::new(
            "Translate",
            "",
            PresetKind::Translation {
                source_language: "auto".to_string(),
                target_language: "en".to_string(),
                provider_override: Some(ProviderOverride {
                    provider: "deepl".to_string(),
                    base_url: None,
                    api_key: Some("k:fx".to_string()),
                    model: None,
                }),
            },
        );
        assert_eq!(router.process(&preset, "hola").await.unwrap(), "hello");
    }
}
