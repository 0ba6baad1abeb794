//! HTTP client for the vocabulary registry REST API.
//!
//! Issues `GET {api_root}/{voc_id}/data?uri=<uri>` with a JSON-LD accept
//! header and a fixed user agent. One request per fetch, no retries.

use crate::config::{RegistryConfig, VocabConfig};
use crate::document::VocabDocument;
use crate::error::{Result, VocabError};
use crate::network::fetcher::VocabFetcher;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

/// reqwest-backed [`VocabFetcher`].
pub struct HttpFetcher {
    client: Client,
    api_root: String,
}

impl HttpFetcher {
    /// Create a fetcher using the timeout, user agent and API root from `config`.
    pub fn new(config: &VocabConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| VocabError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: Some(e.to_string()),
            })?;

        Ok(Self {
            client,
            api_root: config.api_root.trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for a vocabulary document.
    pub fn api_url(&self, voc_id: &str, uri: &str) -> String {
        format!(
            "{}/{}/data?uri={}",
            self.api_root,
            voc_id,
            urlencoding::encode(uri)
        )
    }
}

#[async_trait]
impl VocabFetcher for HttpFetcher {
    async fn fetch(&self, voc_id: &str, uri: &str) -> Result<Option<VocabDocument>> {
        let api_call = self.api_url(voc_id, uri);
        debug!("Making API call: {}", api_call);

        let response = match self
            .client
            .get(&api_call)
            .header(header::ACCEPT, RegistryConfig::ACCEPT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("GET {} failed: {}", api_call, e);
                return Ok(None);
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            error!("Registry returned {} for {}", status, api_call);
            return Ok(None);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to read response body from {}: {}", api_call, e);
                return Ok(None);
            }
        };

        let value: Value = serde_json::from_str(&body).map_err(|e| VocabError::Json {
            message: format!("Registry returned malformed JSON for {}: {}", uri, e),
            source: Some(e),
        })?;

        Ok(Some(VocabDocument::new(value)))
    }
}
