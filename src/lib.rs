//! Sentiment Operations Dashboard Client Library
//!
//! This library provides components for polling a sentiment-analysis
//! backend's health, metrics and scoring endpoints and reconciling the
//! results into a single dashboard view state.

pub mod config;
pub mod client;
pub mod model;
pub mod refresh;
pub mod view;
pub mod errors;

pub use config::Config;
pub use client::ApiClient;
pub use model::{MetricsSnapshot, Probe, ProbeResult, SentimentLabel, SentimentResult};
pub use refresh::{
    DashboardController, DashboardState, RefreshOutcome, SourceOutcome, StatusSummary,
};
pub use errors::{DashboardError, Result};
