//! Sentiment Operations Dashboard Binary

use clap::Parser;
use sentiment_dashboard::{view, Config, DashboardController, Result};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal dashboard for a sentiment-analysis backend
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the sentiment backend
    #[arg(long)]
    backend_url: Option<String>,

    /// Seconds between refresh cycles
    #[arg(long)]
    interval_seconds: Option<u64>,

    /// Run a single refresh cycle and exit
    #[arg(long)]
    once: bool,

    /// Score one text snippet and exit
    #[arg(long, value_name = "TEXT")]
    analyze: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    initialize_tracing();

    let cli = Cli::parse();

    info!("Starting Sentiment Dashboard v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration, CLI flags take precedence over environment
    let mut config = Config::from_env();
    if let Some(backend_url) = cli.backend_url {
        config.backend_url = backend_url;
    }
    if let Some(seconds) = cli.interval_seconds {
        config.refresh_interval = Duration::from_secs(seconds);
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    info!(
        "Dashboard configuration - Backend: {}, Interval: {}s, Timeout: {}s",
        config.backend_url,
        config.refresh_interval.as_secs(),
        config.http_timeout.as_secs()
    );

    let controller = DashboardController::new(config)?;

    if let Some(text) = cli.analyze {
        match controller.analyze(&text).await {
            Ok(result) => {
                info!(
                    "Sentiment {} - score {:.3}, confidence {}%, {} tokens analyzed",
                    result.label.to_uppercase(),
                    result.score,
                    view::percent(result.confidence),
                    result.tokens_analyzed
                );
            }
            Err(e) => {
                error!("Analysis failed: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    if cli.once {
        controller.refresh().await;
        controller.report().await;
        return Ok(());
    }

    if let Err(e) = controller.watch().await {
        error!("Dashboard watcher failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
