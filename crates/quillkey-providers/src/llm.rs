//! Prompt execution against OpenAI-compatible chat endpoints

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::error::ProviderError;
use crate::relay::{FetchRelay, RelayRequest};

/// Placeholder in user prompts replaced with the captured text
pub const INPUT_PLACEHOLDER: &str = "{{input}}";

/// System message pinning the model to bare output
pub const SYSTEM_PROMPT: &str = "You are a text processor. Respond ONLY with the processed output. No explanations, no additional text, no markdown formatting.";

/// Endpoint configuration for a chat-completions call
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

/// Runs prompt-template presets through a chat-completions endpoint
pub struct LlmExecutor {
    relay: Arc<dyn FetchRelay>,
}

impl LlmExecutor {
    pub fn new(relay: Arc<dyn FetchRelay>) -> Self {
        LlmExecutor { relay }
    }

    /// Substitute the captured text into the prompt template.
    ///
    /// Every occurrence of the placeholder is replaced. A template with no
    /// placeholder gets the input appended so the text is never dropped.
    pub fn render_prompt(template: &str, input: &str) -> String {
        if template.contains(INPUT_PLACEHOLDER) {
            template.replace(INPUT_PLACEHOLDER, input)
        } else {
            format!("{template}\n\n{input}")
        }
    }

    /// Trailing slashes trimmed, then the chat-completions path appended
    pub fn chat_completions_url(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }

    pub async fn execute(
        &self,
        prompt_template: &str,
        input: &str,
        config: &LlmConfig,
    ) -> Result<String, ProviderError> {
        let prompt = Self::render_prompt(prompt_template, input);
        let url = Self::chat_completions_url(&config.base_url);
        debug!(model = %config.model, url = %url, "executing prompt");

        let body = json!({
            "model": config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
        });

        let mut request = RelayRequest::post_json(url, body);
        if let Some(key) = &config.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = self.relay.fetch(request).await?.into_json()?;
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(ProviderError::MalformedResponse)
    }
}
