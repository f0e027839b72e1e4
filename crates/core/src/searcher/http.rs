//! HTTP search backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::{ApiConfig, ApiEndpoints, PageLocation};
use crate::metrics;

use super::types::HealthResponse;
use super::{ProductSearcher, SearchError, SearchRequest, SearchResponse};

/// Longest slice of an error body kept in log lines.
const BODY_PREVIEW_CHARS: usize = 200;

/// Search client for the recommendation backend's JSON API.
pub struct HttpSearchClient {
    client: Client,
    endpoints: ApiEndpoints,
}

impl HttpSearchClient {
    /// Create a client for already-resolved endpoints.
    pub fn new(endpoints: ApiEndpoints, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoints })
    }

    /// Resolve the base URL once from configuration and build the client.
    pub fn from_config(api: &ApiConfig, page: Option<&PageLocation>) -> Result<Self, SearchError> {
        let endpoints = ApiEndpoints::resolve(api, page);
        debug!(base_url = %endpoints.base_url(), "Resolved search backend");
        Self::new(endpoints, Duration::from_secs(api.timeout_secs as u64))
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    async fn execute(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let response = self
            .client
            .post(self.endpoints.search())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Transport(format!("request timed out: {}", e))
                } else {
                    SearchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(
                status = status.as_u16(),
                body = %body.chars().take(BODY_PREVIEW_CHARS).collect::<String>(),
                "Search backend returned an error status"
            );
            return Err(SearchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(format!("failed to read response body: {}", e)))?;

        let parsed: SearchResponse = serde_json::from_slice(&body)
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        Ok(parsed.with_inferred_inventory())
    }
}

#[async_trait]
impl ProductSearcher for HttpSearchClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let start = Instant::now();
        debug!(query = %request.query, top_k = request.top_k, "Sending search request");

        let result = self.execute(request).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind().as_str(),
        };
        metrics::SEARCH_REQUESTS.with_label_values(&[outcome]).inc();
        metrics::SEARCH_DURATION
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(response) => debug!(
                in_stock = response.recommended_in_stock_products.len(),
                out_of_stock = response.recommended_out_of_stock_products.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Search complete"
            ),
            Err(e) => debug!(error = %e, kind = outcome, "Search request failed"),
        }

        result
    }

    async fn health(&self) -> bool {
        let healthy = match self.client.get(self.endpoints.health()).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<HealthResponse>().await {
                    Ok(body) => body.status == "healthy",
                    Err(e) => {
                        debug!(error = %e, "Health response was not understood");
                        false
                    }
                }
            }
            Ok(response) => {
                debug!(status = response.status().as_u16(), "Health check returned error status");
                false
            }
            Err(e) => {
                debug!(error = %e, "Health check failed");
                false
            }
        };

        metrics::HEALTH_CHECKS
            .with_label_values(&[if healthy { "healthy" } else { "unhealthy" }])
            .inc();
        healthy
    }
}
