//! Active health supervision.
//!
//! # Responsibilities
//! - Periodically probe the service's status endpoint
//! - Fold each result into the failure streak
//! - Publish the verdict to whoever acts on it (orchestrator, CLI)
//!
//! The supervisor never restarts or deregisters anything itself.

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time::{self, MissedTickBehavior};

use crate::health::probe::{ProbeResult, Prober};
use crate::health::state::{HealthStatus, HealthTracker};
use crate::observability::metrics;

pub struct Supervisor<P> {
    prober: P,
    tracker: HealthTracker,
    interval: Duration,
    verdict_tx: watch::Sender<HealthStatus>,
}

impl<P: Prober> Supervisor<P> {
    /// `retries` is the failure streak that flips the verdict; 0 behaves as 1.
    pub fn new(prober: P, interval: Duration, retries: u32) -> Self {
        let (verdict_tx, _) = watch::channel(HealthStatus::Healthy);
        Self {
            prober,
            tracker: HealthTracker::new(retries),
            interval,
            verdict_tx,
        }
    }

    /// Receive verdict changes. The current value is the latest verdict.
    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.verdict_tx.subscribe()
    }

    pub fn status(&self) -> HealthStatus {
        self.tracker.status()
    }

    pub fn failure_streak(&self) -> u32 {
        self.tracker.failure_streak()
    }

    /// One supervision cycle: probe, then fold the result.
    pub async fn evaluate(&mut self) -> HealthStatus {
        let result = self.prober.probe_once().await;
        self.record(result)
    }

    /// Fold an externally obtained result into the streak.
    pub fn record(&mut self, result: ProbeResult) -> HealthStatus {
        let status = self.tracker.record(result.outcome);

        tracing::info!(
            outcome = result.outcome.as_str(),
            latency_ms = result.latency.as_millis() as u64,
            failure_streak = self.tracker.failure_streak(),
            verdict = %status,
            "Probe recorded"
        );
        metrics::record_probe(&result, self.tracker.failure_streak(), status);

        self.verdict_tx.send_if_modified(|current| {
            if *current != status {
                *current = status;
                true
            } else {
                false
            }
        });
        status
    }

    /// Run until shutdown. Cycles start every `interval`; the first one
    /// runs immediately. Shutdown only interrupts the wait between cycles,
    /// an in-flight probe always resolves (or hits its own deadline) first.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> HealthStatus {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            threshold = self.tracker.threshold(),
            "Health supervisor starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.recv() => {
                    tracing::info!("Health supervisor received shutdown signal, exiting loop");
                    break;
                }
            }
            self.evaluate().await;
        }

        self.tracker.status()
    }
}
