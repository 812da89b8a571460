//! HTTP clients for the sentiment backend endpoints

use crate::errors::{DashboardError, Result};
use crate::model::{
    MetricsSnapshot, Probe, ProbeResult, SentimentBatchRequest, SentimentBatchResponse,
    SentimentRequest, SentimentResult,
};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const METRICS_PATH: &str = "/api/v1/metrics/sentiment";
const SENTIMENT_PATH: &str = "/api/v1/sentiment";
const SENTIMENT_BATCH_PATH: &str = "/api/v1/sentiment/batch";

/// Typed client for the backend's health, metrics and scoring endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, http_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(http_timeout)
            .user_agent(format!("sentiment_dashboard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DashboardError::Http)?;

        Ok(Self { client, base_url })
    }

    /// Fetch a named health probe
    pub async fn fetch_health(&self, probe: Probe) -> Result<ProbeResult> {
        let url = format!("{}{}", self.base_url, probe.path());
        debug!("Checking {} probe at {}", probe, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DashboardError::HealthCheck {
                probe,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let result: ProbeResult = serde_json::from_str(&body)?;
        Ok(result)
    }

    /// Fetch aggregate sentiment statistics
    pub async fn fetch_metrics(&self) -> Result<MetricsSnapshot> {
        let url = format!("{}{}", self.base_url, METRICS_PATH);
        debug!("Fetching sentiment metrics from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DashboardError::Metrics {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let snapshot: MetricsSnapshot = serde_json::from_str(&body)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Score a single text snippet
    pub async fn analyze(&self, text: &str) -> Result<SentimentResult> {
        if text.trim().is_empty() {
            return Err(DashboardError::Validation(
                "Enter some text to analyze".to_string(),
            ));
        }

        let url = format!("{}{}", self.base_url, SENTIMENT_PATH);
        debug!("Scoring {} characters via {}", text.len(), url);

        let response = self
            .client
            .post(&url)
            .json(&SentimentRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let message = if message.trim().is_empty() {
                "Unable to analyze sentiment".to_string()
            } else {
                message
            };
            return Err(DashboardError::Sentiment { message });
        }

        let body = response.text().await?;
        let result: SentimentResult = serde_json::from_str(&body)?;
        result.validate()?;
        Ok(result)
    }

    /// Score a batch of text snippets in one round trip
    pub async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<SentimentResult>> {
        if texts.is_empty() {
            return Err(DashboardError::Validation(
                "Provide at least one text to analyze".to_string(),
            ));
        }

        if texts.iter().any(|text| text.trim().is_empty()) {
            return Err(DashboardError::Validation(
                "Batch entries cannot be empty".to_string(),
            ));
        }

        let url = format!("{}{}", self.base_url, SENTIMENT_BATCH_PATH);
        debug!("Scoring batch of {} texts via {}", texts.len(), url);

        let response = self
            .client
            .post(&url)
            .json(&SentimentBatchRequest {
                texts: texts.to_vec(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let message = if message.trim().is_empty() {
                "Unable to analyze sentiment batch".to_string()
            } else {
                message
            };
            return Err(DashboardError::Sentiment { message });
        }

        let body = response.text().await?;
        let batch: SentimentBatchResponse = serde_json::from_str(&body)?;
        for result in &batch.predictions {
            result.validate()?;
        }
        Ok(batch.predictions)
    }
}
