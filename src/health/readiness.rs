//! Service-side readiness registry.
//!
//! The application registers named components (database, upstream API, ...)
//! and flips their status as it learns about them. The `/healthz` handler
//! only takes a snapshot, so it never waits on application work.
//!
//! With nothing registered the process is healthy as long as it is running
//! and the listener answers.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

use crate::health::state::HealthStatus;

/// Status of one application component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Ok,
    Unknown,
    Down,
}

/// Point-in-time view of all components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessSnapshot {
    pub status: HealthStatus,
    pub components: BTreeMap<String, ComponentStatus>,
}

/// Concurrent registry of component statuses. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Readiness {
    components: Arc<DashMap<String, ComponentStatus>>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component as `Unknown` unless it is already present.
    pub fn register(&self, name: impl Into<String>) {
        self.components
            .entry(name.into())
            .or_insert(ComponentStatus::Unknown);
    }

    /// Set a component's status, registering it if needed.
    pub fn set(&self, name: impl Into<String>, status: ComponentStatus) {
        let name = name.into();
        let previous = self.components.insert(name.clone(), status);
        if previous != Some(status) {
            tracing::debug!(component = %name, status = ?status, "Component status changed");
        }
    }

    pub fn remove(&self, name: &str) {
        self.components.remove(name);
    }

    /// Healthy iff every registered component is `Ok`; status and
    /// components come from the same pass over the registry.
    pub fn snapshot(&self) -> ReadinessSnapshot {
        let components: BTreeMap<String, ComponentStatus> = self
            .components
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        let status = if components.values().all(|s| *s == ComponentStatus::Ok) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        ReadinessSnapshot { status, components }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_is_healthy() {
        let readiness = Readiness::new();
        assert_eq!(readiness.snapshot().status, HealthStatus::Healthy);
        assert!(readiness.snapshot().components.is_empty());
    }

    #[test]
    fn unknown_component_is_unhealthy() {
        let readiness = Readiness::new();
        readiness.register("slack");
        assert_eq!(readiness.snapshot().status, HealthStatus::Unhealthy);

        readiness.set("slack", ComponentStatus::Ok);
        assert_eq!(readiness.snapshot().status, HealthStatus::Healthy);
    }

    #[test]
    fn register_does_not_reset_status() {
        let readiness = Readiness::new();
        readiness.set("llm", ComponentStatus::Ok);
        readiness.register("llm");
        assert_eq!(readiness.snapshot().components["llm"], ComponentStatus::Ok);
    }

    #[test]
    fn clones_share_state() {
        let readiness = Readiness::new();
        let handle = readiness.clone();
        handle.set("db", ComponentStatus::Down);
        assert_eq!(readiness.snapshot().status, HealthStatus::Unhealthy);

        handle.remove("db");
        assert_eq!(readiness.snapshot().status, HealthStatus::Healthy);
    }

    #[test]
    fn snapshot_serializes_lowercase() {
        let readiness = Readiness::new();
        readiness.set("mcp", ComponentStatus::Ok);
        let json = serde_json::to_value(readiness.snapshot()).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["components"]["mcp"], "ok");
    }
}
