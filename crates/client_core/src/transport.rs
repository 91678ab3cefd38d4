//! HTTP transport for the disclosure generation service.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    error::ApiErrorBody,
    protocol::{DisclosureRequest, DisclosureResponse, HealthStatus, HistoryItem},
};
use tracing::{info, warn};

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Calls the form controller makes against the generation backend.
///
/// Every `Err` is treated the same by callers; implementations only need to
/// report failure, not classify it.
#[async_trait]
pub trait DisclosureApi: Send + Sync {
    async fn generate_disclosure(&self, request: &DisclosureRequest)
        -> Result<DisclosureResponse>;
    async fn history(&self, limit: u32) -> Result<Vec<HistoryItem>>;
    async fn health(&self) -> Result<HealthStatus>;

    async fn history_default(&self) -> Result<Vec<HistoryItem>> {
        self.history(DEFAULT_HISTORY_LIMIT).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpDisclosureClient {
    http: Client,
    base_url: String,
}

impl HttpDisclosureClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turns a non-2xx response into an error, logging the backend's `detail` if it sent one.
async fn ensure_success(response: Response, operation: &'static str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(envelope) => warn!(operation, %status, detail = %envelope.detail, "backend rejected request"),
        Err(_) => warn!(operation, %status, "backend rejected request"),
    }
    Err(anyhow!("{operation} failed with status {status}"))
}

#[async_trait]
impl DisclosureApi for HttpDisclosureClient {
    async fn generate_disclosure(
        &self,
        request: &DisclosureRequest,
    ) -> Result<DisclosureResponse> {
        let url = self.endpoint("/api/generate-disclosure");
        info!(
            url = %url,
            company = %request.company_name,
            frameworks = request.frameworks.len(),
            metrics = request.metrics.len(),
            "requesting disclosure generation"
        );

        let res = self.http.post(&url).json(request).send().await?;
        let body: DisclosureResponse = ensure_success(res, "generate disclosure")
            .await?
            .json()
            .await?;

        info!(
            suggestions = body.improvement_suggestions.len(),
            total_tokens = ?body.total_tokens,
            "disclosure generated"
        );
        Ok(body)
    }

    async fn history(&self, limit: u32) -> Result<Vec<HistoryItem>> {
        let url = self.endpoint("/api/history");
        let res = self
            .http
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;
        let items: Vec<HistoryItem> = ensure_success(res, "fetch history").await?.json().await?;
        info!(limit, count = items.len(), "fetched disclosure history");
        Ok(items)
    }

    async fn health(&self) -> Result<HealthStatus> {
        let res = self.http.get(self.endpoint("/health")).send().await?;
        Ok(ensure_success(res, "health check").await?.json().await?)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
