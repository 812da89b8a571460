//! Error types for the dashboard client

use crate::model::Probe;
use std::fmt;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug)]
pub enum DashboardError {
    /// IO operation failed
    Io(std::io::Error),

    /// Transport-level failure (connection refused, timeout, TLS)
    Http(reqwest::Error),

    /// Response body was not valid JSON for the expected shape
    Json(serde_json::Error),

    /// Response parsed but carried out-of-range values
    Shape(String),

    /// Health probe answered with a non-success status
    HealthCheck { probe: Probe, status: u16 },

    /// Metrics endpoint answered with a non-success status
    Metrics { status: u16 },

    /// Scoring endpoint rejected the request
    Sentiment { message: String },

    /// Request rejected client-side before any network call
    Validation(String),

    /// Configuration error
    Config(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Io(err) => write!(f, "IO error: {}", err),
            DashboardError::Http(err) => write!(f, "HTTP error: {}", err),
            DashboardError::Json(err) => write!(f, "JSON error: {}", err),
            DashboardError::Shape(msg) => write!(f, "Malformed response: {}", msg),
            DashboardError::HealthCheck { probe, status } => {
                write!(f, "Health check {} failed ({})", probe, status)
            }
            DashboardError::Metrics { status } => {
                write!(f, "Unable to load sentiment metrics ({})", status)
            }
            DashboardError::Sentiment { message } => write!(f, "{}", message),
            DashboardError::Validation(msg) => write!(f, "{}", msg),
            DashboardError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Io(err) => Some(err),
            DashboardError::Http(err) => Some(err),
            DashboardError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Io(err)
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Json(err)
    }
}
