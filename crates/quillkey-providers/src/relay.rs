//! Fetch relay abstraction
//!
//! All provider traffic goes through a [`FetchRelay`] so callers can run
//! every request from one privileged place and tests can substitute a
//! canned transport.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderError;

/// A single outbound HTTP request
#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl RelayRequest {
    /// POST request with a JSON body
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        RelayRequest {
            url: url.into(),
            method: "POST".to_string(),
            headers,
            body: Some(body),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Response payload from the relay
#[derive(Debug, Clone)]
pub enum RelayData {
    Json(Value),
    Text(String),
}

impl RelayData {
    /// The payload as JSON, or a malformed-response error for plain text
    pub fn into_json(self) -> Result<Value, ProviderError> {
        match self {
            RelayData::Json(value) => Ok(value),
            RelayData::Text(_) => Err(ProviderError::MalformedResponse),
        }
    }
}

/// Transport used by every provider
#[async_trait]
pub trait FetchRelay: Send + Sync {
    async fn fetch(&self, request: RelayRequest) -> Result<RelayData, ProviderError>;
}
