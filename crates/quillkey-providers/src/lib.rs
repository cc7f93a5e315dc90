//! Remote text processing
//!
//! Network-backed processing strategies and their plumbing:
//! - [`FetchRelay`] — the request/response contract used whenever a call
//!   must be made on behalf of a context that cannot issue it directly
//! - [`HttpFetchRelay`] — reqwest-backed relay implementation
//! - [`LlmExecutor`] — templated prompting against OpenAI-compatible
//!   chat-completions endpoints
//! - [`TranslationProvider`] implementations and the [`TranslationEngine`]
//!   that manages the shared provider and transient per-preset overrides

pub mod deepl;
pub mod engine;
pub mod error;
pub mod http;
pub mod llm;
pub mod openai;
pub mod relay;
pub mod translate;

pub use deepl::DeepLProvider;
pub use engine::{create_provider, ProviderConfig, TranslationEngine};
pub use error::ProviderError;
pub use http::HttpFetchRelay;
pub use llm::{LlmConfig, LlmExecutor, INPUT_PLACEHOLDER, SYSTEM_PROMPT};
pub use openai::OpenAiCompatibleProvider;
pub use relay::{FetchRelay, RelayData, RelayRequest};
pub use translate::{TranslationProvider, TranslationRequest, Validation};
