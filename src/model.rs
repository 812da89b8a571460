//! Wire data model for the sentiment backend

use crate::errors::{DashboardError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named health-check endpoint exposed by the backend
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Probe {
    Live,
    Ready,
}

impl Probe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Probe::Live => "live",
            Probe::Ready => "ready",
        }
    }

    /// Endpoint path for this probe
    pub fn path(&self) -> &'static str {
        match self {
            Probe::Live => "/api/health/live",
            Probe::Ready => "/api/health/ready",
        }
    }
}

impl std::fmt::Display for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health probe payload. Only `status` is required; everything else is
/// passed through untouched, unknown fields included.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProbeResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "POSITIVE"),
            SentimentLabel::Negative => write!(f, "NEGATIVE"),
            SentimentLabel::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Per-label request counts reported by the metrics endpoint
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl LabelCounts {
    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    /// Breakdown entries in display order
    pub fn entries(&self) -> [(SentimentLabel, u64); 3] {
        [
            (SentimentLabel::Positive, self.positive),
            (SentimentLabel::Negative, self.negative),
            (SentimentLabel::Neutral, self.neutral),
        ]
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictionSummary {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TimelinePoint {
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
}

/// Aggregate sentiment statistics from `/api/v1/metrics/sentiment`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub label_counts: LabelCounts,
    pub average_confidence: f64,
    pub recent_predictions: Vec<PredictionSummary>,
    pub timeline: Vec<TimelinePoint>,
}

impl MetricsSnapshot {
    /// Reject snapshots whose confidences fall outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.average_confidence) {
            return Err(DashboardError::Shape(format!(
                "average_confidence {} outside [0, 1]",
                self.average_confidence
            )));
        }
        for prediction in &self.recent_predictions {
            if !(0.0..=1.0).contains(&prediction.confidence) {
                return Err(DashboardError::Shape(format!(
                    "prediction confidence {} outside [0, 1]",
                    prediction.confidence
                )));
            }
        }
        for point in &self.timeline {
            if !(0.0..=1.0).contains(&point.confidence) {
                return Err(DashboardError::Shape(format!(
                    "timeline confidence {} outside [0, 1]",
                    point.confidence
                )));
            }
        }
        Ok(())
    }
}

/// Single scoring result from `/api/v1/sentiment`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SentimentResult {
    pub label: String,
    pub score: f64,
    pub confidence: f64,
    pub tokens_analyzed: u64,
}

impl SentimentResult {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(DashboardError::Shape(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// Request body for `/api/v1/sentiment`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

/// Request body for `/api/v1/sentiment/batch`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentimentBatchRequest {
    pub texts: Vec<String>,
}

/// Response body for `/api/v1/sentiment/batch`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentimentBatchResponse {
    pub predictions: Vec<SentimentResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_paths() {
        assert_eq!(Probe::Live.path(), "/api/health/live");
        assert_eq!(Probe::Ready.path(), "/api/health/ready");
        assert_eq!(Probe::Live.to_string(), "live");
    }

    #[test]
    fn test_probe_result_keeps_unknown_fields() {
        let json = r#"{"status":"ok","service":"sentiment-backend","uptime_seconds":42}"#;
        let result: ProbeResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.status, "ok");
        assert_eq!(result.service.as_deref(), Some("sentiment-backend"));
        assert!(result.detail.is_none());
        assert_eq!(result.extra["uptime_seconds"], 42);
    }

    #[test]
    fn test_probe_result_requires_status() {
        let parsed: std::result::Result<ProbeResult, _> =
            serde_json::from_str(r#"{"service":"sentiment-backend"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_label_round_trip() {
        let label: SentimentLabel = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(label, SentimentLabel::Positive);
        assert_eq!(label.to_string(), "POSITIVE");
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"positive\"");
    }

    #[test]
    fn test_label_counts_total_and_entries() {
        let counts = LabelCounts {
            positive: 7,
            negative: 2,
            neutral: 3,
        };

        assert_eq!(counts.total(), 12);
        let entries = counts.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.iter().map(|(_, n)| n).sum::<u64>(), 12);
    }

    #[test]
    fn test_metrics_snapshot_parsing() {
        let json = r#"{
            "total_requests": 12,
            "label_counts": {"positive": 7, "negative": 2, "neutral": 3},
            "average_confidence": 0.81,
            "recent_predictions": [
                {"label": "positive", "confidence": 0.95, "timestamp": "2024-05-01T12:00:00Z"}
            ],
            "timeline": [
                {"timestamp": "2024-05-01T12:00:00Z", "confidence": 0.95}
            ]
        }"#;

        let snapshot: MetricsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.total_requests, 12);
        assert_eq!(snapshot.label_counts.total(), 12);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_metrics_snapshot_rejects_out_of_range_confidence() {
        let snapshot = MetricsSnapshot {
            total_requests: 1,
            label_counts: LabelCounts::default(),
            average_confidence: 1.7,
            recent_predictions: vec![],
            timeline: vec![],
        };

        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("average_confidence"));
    }

    #[test]
    fn test_sentiment_result_validation() {
        let result = SentimentResult {
            label: "positive".to_string(),
            score: 0.9,
            confidence: 0.95,
            tokens_analyzed: 2,
        };
        assert!(result.validate().is_ok());

        let bad = SentimentResult {
            confidence: -0.2,
            ..result
        };
        assert!(bad.validate().is_err());
    }
}
