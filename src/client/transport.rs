use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::form::LeadPayload;

/// Status and raw body text of an intake response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait LeadTransport: Send + Sync {
    async fn post_lead(&self, payload: &LeadPayload) -> anyhow::Result<TransportResponse>;
}

/// Posts leads to `{base_url}/api/lead` with the client's default timeouts.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/lead", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl LeadTransport for HttpTransport {
    async fn post_lead(&self, payload: &LeadPayload) -> anyhow::Result<TransportResponse> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("POST {}", self.endpoint))?;
        let status = res.status().as_u16();
        let body = res.text().await.context("read intake response")?;
        debug!(status, endpoint = %self.endpoint, "intake responded");
        Ok(TransportResponse { status, body })
    }
}
