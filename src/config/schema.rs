//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service
//! process and the health supervisor. All types derive Serde traits for
//! deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default port the service listens on and the supervisor probes.
pub const DEFAULT_PORT: u16 = 8080;

/// Path of the status endpoint.
pub const HEALTHZ_PATH: &str = "/healthz";

/// Seconds between supervisor cycles.
pub const PROBE_INTERVAL_SECS: u64 = 20;

/// Hard deadline for a single probe, in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 3;

/// Consecutive failed probes before the verdict flips to unhealthy.
pub const PROBE_RETRIES: u32 = 3;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Supervisor probe policy.
    pub probe: ProbeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("0.0.0.0:{}", DEFAULT_PORT),
        }
    }
}

/// Timeout configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Liveness probe policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Full URL of the status endpoint to probe.
    pub url: String,

    /// Seconds between cycle starts.
    pub interval_secs: u64,

    /// Per-probe deadline in seconds.
    pub timeout_secs: u64,

    /// Number of consecutive failures before reporting unhealthy.
    pub retries: u32,
}

impl ProbeConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: format!("http://127.0.0.1:{}{}", DEFAULT_PORT, HEALTHZ_PATH),
            interval_secs: PROBE_INTERVAL_SECS,
            timeout_secs: PROBE_TIMEOUT_SECS,
            retries: PROBE_RETRIES,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text, for local development.
    #[default]
    Text,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            // Only the service port is exposed by default.
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_container_contract() {
        let config = ServiceConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.probe.url, "http://127.0.0.1:8080/healthz");
        assert_eq!(config.probe.interval(), Duration::from_secs(20));
        assert_eq!(config.probe.timeout(), Duration::from_secs(3));
        assert_eq!(config.probe.retries, 3);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [probe]
            retries = 5

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.probe.retries, 5);
        assert_eq!(config.probe.interval_secs, PROBE_INTERVAL_SECS);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
