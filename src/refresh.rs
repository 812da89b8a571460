//! Refresh orchestration and dashboard state

use crate::client::ApiClient;
use crate::config::Config;
use crate::errors::{DashboardError, Result};
use crate::model::{MetricsSnapshot, Probe, ProbeResult, SentimentResult};
use crate::view;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// A settled fetch: either the payload or a display-ready error message
pub type Settlement<T> = std::result::Result<T, String>;

/// Per-source view state. After a source settles it is either `Ready` or
/// `Failed`; `Pending` only occurs before the first settlement of a cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceOutcome<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> SourceOutcome<T> {
    pub fn payload(&self) -> Option<&T> {
        match self {
            SourceOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SourceOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SourceOutcome::Pending)
    }
}

impl<T> From<Settlement<T>> for SourceOutcome<T> {
    fn from(settlement: Settlement<T>) -> Self {
        match settlement {
            Ok(value) => SourceOutcome::Ready(value),
            Err(message) => SourceOutcome::Failed(message),
        }
    }
}

/// Result of one full refresh cycle: one settlement per source plus the
/// completion timestamp. Never partially populated.
#[derive(Clone, Debug)]
pub struct RefreshOutcome {
    pub live: Settlement<ProbeResult>,
    pub ready: Settlement<ProbeResult>,
    pub metrics: Settlement<MetricsSnapshot>,
    pub completed_at: DateTime<Utc>,
}

/// Advisory roll-up of the two probe statuses
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusSummary {
    AwaitingChecks,
    Uniform(String),
    Mixed,
}

impl std::fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusSummary::AwaitingChecks => write!(f, "awaiting checks"),
            StatusSummary::Uniform(status) => write!(f, "{}", status),
            StatusSummary::Mixed => write!(f, "mixed"),
        }
    }
}

/// The single view-state object backing the dashboard. Mutated only through
/// the transition methods below.
#[derive(Clone, Debug)]
pub struct DashboardState {
    pub live: SourceOutcome<ProbeResult>,
    pub ready: SourceOutcome<ProbeResult>,
    pub metrics: SourceOutcome<MetricsSnapshot>,
    pub playground: SourceOutcome<SentimentResult>,
    pub last_checked: Option<DateTime<Utc>>,
    pub in_progress: bool,
    generation: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            live: SourceOutcome::Pending,
            ready: SourceOutcome::Pending,
            metrics: SourceOutcome::Pending,
            playground: SourceOutcome::Pending,
            last_checked: None,
            in_progress: false,
            generation: 0,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recently started cycle
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Begin a refresh cycle and return its generation. Stale error text is
    /// dropped here; successful payloads stay visible until replaced.
    pub fn start_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.in_progress = true;

        for outcome in [&mut self.live, &mut self.ready] {
            if matches!(outcome, SourceOutcome::Failed(_)) {
                *outcome = SourceOutcome::Pending;
            }
        }
        if matches!(self.metrics, SourceOutcome::Failed(_)) {
            self.metrics = SourceOutcome::Pending;
        }

        self.generation
    }

    pub fn probe_succeeded(&mut self, probe: Probe, payload: ProbeResult) {
        *self.probe_slot(probe) = SourceOutcome::Ready(payload);
    }

    pub fn probe_failed(&mut self, probe: Probe, message: String) {
        *self.probe_slot(probe) = SourceOutcome::Failed(message);
    }

    pub fn metrics_succeeded(&mut self, snapshot: MetricsSnapshot) {
        self.metrics = SourceOutcome::Ready(snapshot);
    }

    pub fn metrics_failed(&mut self, message: String) {
        self.metrics = SourceOutcome::Failed(message);
    }

    /// Close the cycle. The timestamp is recorded here and nowhere else.
    pub fn complete_refresh(&mut self, completed_at: DateTime<Utc>) {
        self.in_progress = false;
        self.last_checked = Some(completed_at);
    }

    pub fn record_analysis(&mut self, outcome: Settlement<SentimentResult>) {
        self.playground = outcome.into();
    }

    /// Roll the probe statuses up into the display summary. Failed and
    /// pending probes are excluded; only present statuses are compared.
    pub fn status_summary(&self) -> StatusSummary {
        let statuses: Vec<&str> = [&self.live, &self.ready]
            .into_iter()
            .filter_map(|outcome| outcome.payload().map(|probe| probe.status.as_str()))
            .collect();

        match statuses.split_first() {
            None => StatusSummary::AwaitingChecks,
            Some((first, rest)) if rest.iter().all(|status| status == first) => {
                StatusSummary::Uniform(first.to_string())
            }
            Some(_) => StatusSummary::Mixed,
        }
    }

    fn probe_slot(&mut self, probe: Probe) -> &mut SourceOutcome<ProbeResult> {
        match probe {
            Probe::Live => &mut self.live,
            Probe::Ready => &mut self.ready,
        }
    }
}

/// Owns the view state and runs refresh cycles against the backend
#[derive(Clone)]
pub struct DashboardController {
    client: ApiClient,
    config: Config,
    state: Arc<RwLock<DashboardState>>,
    controller_id: String,
}

impl DashboardController {
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(DashboardError::Config)?;

        let client = ApiClient::new(config.backend_url.clone(), config.http_timeout)?;

        Ok(Self {
            client,
            config,
            state: Arc::new(RwLock::new(DashboardState::new())),
            controller_id: Uuid::new_v4().to_string(),
        })
    }

    /// Run one refresh cycle: fan the three fetches out together, wait for
    /// all of them to settle, then fold the settlements into the state.
    /// A cycle superseded by a newer one is discarded wholesale.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.state.write().await.start_refresh();

        let (live, ready, metrics) = futures::join!(
            self.client.fetch_health(Probe::Live),
            self.client.fetch_health(Probe::Ready),
            self.client.fetch_metrics(),
        );

        let outcome = RefreshOutcome {
            live: live.map_err(|err| err.to_string()),
            ready: ready.map_err(|err| err.to_string()),
            metrics: metrics.map_err(|err| err.to_string()),
            completed_at: Utc::now(),
        };

        self.apply(generation, &outcome).await;
        outcome
    }

    /// Fold a settled cycle into the state unless it has been superseded
    async fn apply(&self, generation: u64, outcome: &RefreshOutcome) {
        let mut state = self.state.write().await;

        if state.generation() != generation {
            debug!(
                "Discarding superseded refresh cycle (generation {} < {})",
                generation,
                state.generation()
            );
            return;
        }

        match &outcome.live {
            Ok(payload) => state.probe_succeeded(Probe::Live, payload.clone()),
            Err(message) => state.probe_failed(Probe::Live, message.clone()),
        }
        match &outcome.ready {
            Ok(payload) => state.probe_succeeded(Probe::Ready, payload.clone()),
            Err(message) => state.probe_failed(Probe::Ready, message.clone()),
        }
        match &outcome.metrics {
            Ok(snapshot) => state.metrics_succeeded(snapshot.clone()),
            Err(message) => state.metrics_failed(message.clone()),
        }

        state.complete_refresh(outcome.completed_at);
    }

    /// Score a single text and record the result in the playground slot
    pub async fn analyze(&self, text: &str) -> Result<SentimentResult> {
        let result = self.client.analyze(text).await;

        let settlement = match &result {
            Ok(payload) => Ok(payload.clone()),
            Err(err) => Err(err.to_string()),
        };
        self.state.write().await.record_analysis(settlement);

        result
    }

    /// Score a batch of texts in one round trip
    pub async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<SentimentResult>> {
        self.client.analyze_batch(texts).await
    }

    /// Clone the current view state
    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Poll the backend until interrupted
    pub async fn watch(&self) -> Result<()> {
        info!(
            "Starting dashboard watcher {} against {}",
            self.controller_id, self.config.backend_url
        );

        let poller = self.clone();
        tokio::spawn(async move {
            poller.poll_loop().await;
        });

        tokio::signal::ctrl_c().await?;

        info!("Shutting down dashboard watcher");
        self.report().await;
        Ok(())
    }

    async fn poll_loop(&self) {
        let mut refresh_interval = interval(self.config.refresh_interval);

        loop {
            refresh_interval.tick().await;
            self.refresh().await;
            self.report().await;
        }
    }

    /// Log a summary of the current state
    pub async fn report(&self) {
        let state = self.snapshot().await;

        info!("Overall status: {}", state.status_summary());

        for (probe, outcome) in [(Probe::Live, &state.live), (Probe::Ready, &state.ready)] {
            match outcome {
                SourceOutcome::Ready(result) => info!("Probe {}: {}", probe, result.status),
                SourceOutcome::Failed(message) => warn!("Probe {}: {}", probe, message),
                SourceOutcome::Pending => info!("Probe {}: awaiting first check", probe),
            }
        }

        match &state.metrics {
            SourceOutcome::Ready(snapshot) => {
                info!(
                    "Metrics - {} requests, {}% average confidence",
                    snapshot.total_requests,
                    view::percent(snapshot.average_confidence)
                );
                for (label, count) in snapshot.label_counts.entries() {
                    debug!("Label {}: {}", label, count);
                }
                for prediction in view::recent_predictions(snapshot, self.config.recent_limit) {
                    debug!(
                        "Recent {}: {}%",
                        prediction.label,
                        view::percent(prediction.confidence)
                    );
                }
            }
            SourceOutcome::Failed(message) => warn!("Metrics: {}", message),
            SourceOutcome::Pending => {}
        }

        if let Some(last_checked) = state.last_checked {
            debug!("Last checked at {}", last_checked.to_rfc3339());
        }
    }
}
