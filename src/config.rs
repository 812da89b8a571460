//! Configuration management for the dashboard client

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the sentiment backend
    pub backend_url: String,

    /// Delay between refresh cycles in watch mode
    pub refresh_interval: Duration,

    /// HTTP timeout for backend requests
    pub http_timeout: Duration,

    /// How many recent predictions the cycle report lists
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            refresh_interval: Duration::from_secs(30),
            http_timeout: Duration::from_secs(10),
            recent_limit: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(backend_url) = env::var("BACKEND_URL") {
            config.backend_url = backend_url;
        }

        if let Ok(interval) = env::var("REFRESH_INTERVAL_SECONDS") {
            if let Ok(seconds) = interval.parse::<u64>() {
                config.refresh_interval = Duration::from_secs(seconds);
            }
        }

        if let Ok(timeout) = env::var("HTTP_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.http_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(limit) = env::var("RECENT_PREDICTIONS_LIMIT") {
            if let Ok(limit) = limit.parse() {
                config.recent_limit = limit;
            }
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.backend_url.is_empty() {
            return Err("backend_url cannot be empty".to_string());
        }

        if self.backend_url.ends_with('/') {
            return Err("backend_url must not end with a trailing slash".to_string());
        }

        if self.refresh_interval.is_zero() {
            return Err("refresh_interval must be greater than 0".to_string());
        }

        if self.http_timeout.is_zero() {
            return Err("http_timeout must be greater than 0".to_string());
        }

        if self.recent_limit == 0 {
            return Err("recent_limit must be greater than 0".to_string());
        }

        Ok(())
    }
}
