//! reqwest-backed relay

use async_trait::async_trait;
use tracing::debug;

use crate::error::ProviderError;
use crate::relay::{FetchRelay, RelayData, RelayRequest};

/// Relay that performs real HTTP requests
pub struct HttpFetchRelay {
    client: reqwest::Client,
}

impl HttpFetchRelay {
    pub fn new() -> Self {
        HttpFetchRelay {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetchRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchRelay for HttpFetchRelay {
    async fn fetch(&self, request: RelayRequest) -> Result<RelayData, ProviderError> {
        debug!(url = %request.url, method = %request.method, "relaying request");

        let method: reqwest::Method = request
            .method
            .parse()
            .map_err(|_| ProviderError::Transport(format!("invalid method '{}'", request.method)))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), text));
        }

        if content_type.contains("application/json") {
            let value = serde_json::from_str(&text).map_err(|_| ProviderError::MalformedResponse)?;
            Ok(RelayData::Json(value))
        } else {
            Ok(RelayData::Text(text))
        }
    }
}
