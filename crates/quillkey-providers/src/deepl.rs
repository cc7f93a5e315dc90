//! DeepL translation backend
//!
//! Free-tier keys end in ":fx" and use the api-free host. Responses carry
//! the detected source language, which lets us hand back the input
//! unchanged when it already matches the target.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::ProviderError;
use crate::relay::{FetchRelay, RelayRequest};
use crate::translate::{TranslationProvider, TranslationRequest, Validation};

const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
const PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";

pub struct DeepLProvider {
    relay: Arc<dyn FetchRelay>,
    api_key: String,
}

impl DeepLProvider {
    pub fn new(relay: Arc<dyn FetchRelay>, api_key: impl Into<String>) -> Self {
        DeepLProvider {
            relay,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> &'static str {
        if self.api_key.ends_with(":fx") {
            FREE_ENDPOINT
        } else {
            PRO_ENDPOINT
        }
    }

    fn request_body(text: &str, request: &TranslationRequest) -> serde_json::Value {
        let mut body = json!({
            "text": [text],
            "target_lang": request.target_language.to_uppercase(),
        });
        if let Some(source) = &request.source_language {
            body["source_lang"] = json!(source.to_uppercase());
        }
        body
    }
}

#[async_trait]
impl TranslationProvider for DeepLProvider {
    fn name(&self) -> &str {
        "deepl"
    }

    async fn initialize(&mut self) -> Result<(), ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::ConfigMissing {
                provider: self.name().to_string(),
                detail: "API key is empty".to_string(),
            });
        }
        Ok(())
    }

    async fn translate_text(
        &self,
        text: &str,
        request: &TranslationRequest,
    ) -> Result<String, ProviderError> {
        let relay_request = RelayRequest::post_json(self.endpoint(), Self::request_body(text, request))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key));

        let response = self.relay.fetch(relay_request).await?.into_json()?;
        let translation = &response["translations"][0];
        let translated = translation["text"]
            .as_str()
            .ok_or(ProviderError::MalformedResponse)?;

        // DeepL reports the language it detected; an already-translated
        // input comes back mangled less often if we keep the original.
        if let Some(detected) = translation["detected_source_language"].as_str() {
            if detected.eq_ignore_ascii_case(&request.target_language) {
                debug!(detected, "input already in target language");
                return Ok(text.to_string());
            }
        }

        Ok(translated.to_string())
    }

    async fn validate(&self) -> Validation {
        if self.api_key.is_empty() {
            return Validation::failed("API key is required");
        }
        let probe = TranslationRequest::new("en");
        match self.translate_text("hello", &probe).await {
            Ok(_) => Validation::ok(),
            Err(e) => Validation::failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::RelayData;
    use parking_lot::Mutex;

    struct MockRelay {
        response: serde_json::Value,
        last_request: Mutex<Option<RelayRequest>>,
    }

    #[async_trait]
    impl FetchRelay for MockRelay {
        async fn fetch(&self, request: RelayRequest) -> Result<RelayData, ProviderError> {
            *self.last_request.lock() = Some(request);
            Ok(RelayData::Json(self.response.clone()))
        }
    }

    fn relay_with(response: serde_json::Value) -> Arc<MockRelay> {
        Arc::new(MockRelay {
            response,
            last_request: Mutex::new(None),
        })
    }

    #[test]
    fn test_free_keys_use_free_endpoint() {
        let relay = relay_with(serde_json::json!({}));
        let free = DeepLProvider::new(relay.clone(), "abc:fx");
        let pro = DeepLProvider::new(relay, "abc");
        assert_eq!(free.endpoint(), FREE_ENDPOINT);
        assert_eq!(pro.endpoint(), PRO_ENDPOINT);
    }

    #[tokio::test]
    async fn test_translate_extracts_first_translation() {
        let relay = relay_with(serde_json::json!({
            "translations": [{"text": "hola", "detected_source_language": "EN"}]
        }));
        let provider = DeepLProvider::new(relay.clone(), "k:fx");
        let out = provider
            .translate_text("hello", &TranslationRequest::new("es"))
            .await
            .unwrap();
        assert_eq!(out, "hola");

        let sent = relay.last_request.lock().clone().unwrap();
        assert_eq!(sent.url, FREE_ENDPOINT);
        assert_eq!(
            sent.headers.get("Authorization").map(String::as_str),
            Some("DeepL-Auth-Key k:fx")
        );
        assert_eq!(sent.body.unwrap()["target_lang"], "ES");
    }

    #[tokio::test]
    async fn test_detected_target_language_keeps_input() {
        let relay = relay_with(serde_json::json!({
            "translations": [{"text": "mangled", "detected_source_language": "EN"}]
        }));
        let provider = DeepLProvider::new(relay, "k");
        let out = provider
            .translate_text("already english", &TranslationRequest::new("en"))
            .await
            .unwrap();
        assert_eq!(out, "already english");
    }

    #[tokio::test]
    async fn test_missing_translation_is_malformed() {
        let relay = relay_with(serde_json::json!({"translations": []}));
        let provider = DeepLProvider::new(relay, "k");
        let err = provider
            .translate_text("hello", &TranslationRequest::new("es"))
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::MalformedResponse);
    }
}
