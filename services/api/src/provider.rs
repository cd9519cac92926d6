//! HTTP client for the upstream conversational-AI provider.
//!
//! The provider issues time-limited signed URLs that authorize opening its
//! conversation socket. This client wraps that single REST call; the socket
//! itself is handled in [`crate::ws::upstream`].

use anyhow::{Context, Result};
use serde::Deserialize;

/// Client for the provider's management REST API.
#[derive(Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct SignedUrlBody {
    #[serde(alias = "signedUrl")]
    signed_url: String,
}

impl ProviderClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Requests a signed conversation URL for `agent_id`.
    pub async fn issue_signed_url(&self, agent_id: &str) -> Result<String> {
        let url = format!("{}/v1/conversation/signed-url", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("agent_id", agent_id)])
            .send()
            .await
            .context("signed-url request failed")?
            .error_for_status()
            .context("provider rejected the signed-url request")?;
        let body: SignedUrlBody = response
            .json()
            .await
            .context("malformed signed-url response")?;
        Ok(body.signed_url)
    }
}
