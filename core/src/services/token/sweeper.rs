//! Recurring sweep of expired and stale-revoked refresh tokens.
//!
//! The sweeper is an owned component with an explicit start/stop lifecycle,
//! created once at startup and injected where needed. It only reclaims
//! storage: validation never depends on a sweep having run.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::{SweepCriteria, TokenRepository};

/// Configuration for the token sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// How long revoked rows are kept before deletion (in days)
    pub retention_days: i64,
    /// Whether the recurring sweep is scheduled at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            retention_days: 7,
            enabled: true,
        }
    }
}

impl SweeperConfig {
    fn retention(&self) -> Duration {
        Duration::days(self.retention_days)
    }
}

impl From<&cb_shared::config::SweepConfig> for SweeperConfig {
    fn from(config: &cb_shared::config::SweepConfig) -> Self {
        Self {
            interval_seconds: config.interval_secs,
            retention_days: config.retention_days,
            enabled: config.enabled,
        }
    }
}

/// Summary of one completed sweep
#[derive(Debug, Clone, Copy)]
pub struct SweepOutcome {
    /// The single time snapshot the sweep deleted against
    pub swept_at: DateTime<Utc>,
    /// Number of rows deleted
    pub deleted: u64,
}

/// Background sweeper deleting refresh-token rows past their retention window
///
/// One spawned task owns the timer and awaits every sweep to completion, so
/// two sweeps can never run concurrently; a tick that comes due while a sweep
/// is still running is skipped, not queued. A failed sweep rolls back, is
/// logged, and the task simply waits for the next tick.
pub struct TokenSweeper<R: TokenRepository + 'static> {
    repository: Arc<R>,
    config: SweeperConfig,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl<R: TokenRepository> TokenSweeper<R> {
    /// Create a new sweeper; no timer runs until `start` is called
    pub fn new(repository: Arc<R>, config: SweeperConfig) -> Self {
        Self {
            repository,
            config,
            shutdown: None,
            task: None,
        }
    }

    /// Whether the recurring task is currently scheduled
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Run a single sweep immediately, outside the schedule
    pub async fn sweep_once(&self) -> Result<SweepOutcome, DomainError> {
        run_sweep(self.repository.as_ref(), self.config.retention()).await
    }

    /// Register the recurring sweep
    ///
    /// The first sweep runs one full interval after startup. Calling `start`
    /// on an already-running sweeper is a no-op.
    pub fn start(&mut self) {
        if !self.config.enabled {
            warn!("token sweeper is disabled by configuration");
            return;
        }
        if self.task.is_some() {
            return;
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let repository = Arc::clone(&self.repository);
        let retention = self.config.retention();
        let period = std::time::Duration::from_secs(self.config.interval_seconds);

        let task = tokio::spawn(async move {
            info!(
                interval_seconds = period.as_secs(),
                retention_days = retention.num_days(),
                "token sweeper started"
            );

            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Awaited inline: the next tick cannot fire until this
                        // sweep's transaction has committed or rolled back.
                        match run_sweep(repository.as_ref(), retention).await {
                            Ok(outcome) => {
                                info!(
                                    deleted = outcome.deleted,
                                    swept_at = %outcome.swept_at,
                                    "expired tokens cleaned up"
                                );
                            }
                            Err(e) => {
                                error!(error = %e, "token sweep failed; waiting for next tick");
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }

            info!("token sweeper stopped");
        });

        self.shutdown = Some(shutdown_tx);
        self.task = Some(task);
    }

    /// Deregister the recurring sweep
    ///
    /// No new sweep is scheduled after this returns; a sweep already in
    /// flight finishes first (its transaction commits or rolls back, never
    /// half-applies).
    pub async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<R: TokenRepository> Drop for TokenSweeper<R> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Execute one sweep as a single atomic delete against the store
async fn run_sweep<R: TokenRepository>(
    repository: &R,
    retention: Duration,
) -> Result<SweepOutcome, DomainError> {
    // One snapshot per sweep; never re-read per row.
    let now = Utc::now();
    let criteria = SweepCriteria::at(now, retention);
    let deleted = repository.delete_stale_tokens(&criteria).await?;

    Ok(SweepOutcome {
        swept_at: now,
        deleted,
    })
}
