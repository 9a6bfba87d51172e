//! Health state machine.
//!
//! # States
//! - Healthy: instance should keep receiving traffic
//! - Unhealthy: orchestrator should restart or deregister it
//!
//! # State Transitions
//! ```text
//! Healthy → Unhealthy: consecutive failures >= threshold
//! Unhealthy → Healthy: the very next success
//! ```
//!
//! # Design Decisions
//! - A plain consecutive-failure counter, not a sliding window
//! - One success fully resets the streak
//! - The tracker is owned by a single supervisor; replicas never share one

use serde::Serialize;

use crate::health::probe::ProbeOutcome;

/// Binary health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    #[default]
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(self) -> bool {
        self == HealthStatus::Healthy
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the verdict from the current streak.
///
/// Below the threshold the prior verdict stands. Since a success always
/// zeroes the streak and reports healthy, this only ever keeps `Unhealthy`
/// when the streak is already past the threshold.
pub fn verdict(failure_streak: u32, threshold: u32, prior: HealthStatus) -> HealthStatus {
    if failure_streak == 0 {
        HealthStatus::Healthy
    } else if failure_streak >= threshold {
        HealthStatus::Unhealthy
    } else {
        prior
    }
}

/// Tracks the consecutive failure streak for one monitored process.
#[derive(Debug, Clone)]
pub struct HealthTracker {
    status: HealthStatus,
    failure_streak: u32,
    threshold: u32,
}

impl HealthTracker {
    /// Create a tracker that reports unhealthy after `threshold` failures.
    ///
    /// A `threshold` of 0 is treated as 1: a streak of zero failures is
    /// always healthy, so the first failure is the earliest possible flip.
    /// Config and CLI input reject 0 before it gets here.
    pub fn new(threshold: u32) -> Self {
        Self {
            status: HealthStatus::Healthy,
            failure_streak: 0,
            threshold: threshold.max(1),
        }
    }

    /// Fold one probe outcome into the streak and return the new verdict.
    pub fn record(&mut self, outcome: ProbeOutcome) -> HealthStatus {
        if outcome.is_success() {
            self.failure_streak = 0;
        } else {
            self.failure_streak = self.failure_streak.saturating_add(1);
        }

        let next = verdict(self.failure_streak, self.threshold, self.status);
        if next != self.status {
            match next {
                HealthStatus::Unhealthy => tracing::warn!(
                    failures = self.failure_streak,
                    threshold = self.threshold,
                    "Service marked unhealthy"
                ),
                HealthStatus::Healthy => tracing::info!("Service recovered to healthy"),
            }
        }
        self.status = next;
        next
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn failure_streak(&self) -> u32 {
        self.failure_streak
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
