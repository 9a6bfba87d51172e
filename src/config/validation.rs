//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals and thresholds > 0)
//! - Check the probe target is a plain HTTP URL
//!
//! All problems are collected so a bad config reports everything at once.

use thiserror::Error;
use url::Url;

use crate::config::schema::{ProbeConfig, ServiceConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("probe.timeout_secs ({timeout}) must not exceed probe.interval_secs ({interval})")]
    TimeoutExceedsInterval { timeout: u64, interval: u64 },

    #[error("probe.url '{url}' is invalid: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Validate the full service configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }
    collect_probe_errors(&config.probe, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a full probe policy on its own (`health-supervisor watch`).
pub fn validate_probe(probe: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    collect_probe_errors(probe, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate only what a one-shot check uses: the target URL and the deadline.
/// Interval and retries never apply to a single request.
pub fn validate_check(probe: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    collect_target_errors(probe, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_probe_errors(probe: &ProbeConfig, errors: &mut Vec<ValidationError>) {
    if probe.interval_secs == 0 {
        errors.push(ValidationError::Zero { field: "probe.interval_secs" });
    }
    if probe.retries == 0 {
        errors.push(ValidationError::Zero { field: "probe.retries" });
    }
    if probe.interval_secs > 0 && probe.timeout_secs > probe.interval_secs {
        errors.push(ValidationError::TimeoutExceedsInterval {
            timeout: probe.timeout_secs,
            interval: probe.interval_secs,
        });
    }
    collect_target_errors(probe, errors);
}

fn collect_target_errors(probe: &ProbeConfig, errors: &mut Vec<ValidationError>) {
    if probe.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "probe.timeout_secs" });
    }

    match Url::parse(&probe.url) {
        Ok(url) if url.scheme() != "http" => errors.push(ValidationError::InvalidUrl {
            url: probe.url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Ok(url) if url.host_str().is_none() => errors.push(ValidationError::InvalidUrl {
            url: probe.url.clone(),
            reason: "missing host".to_string(),
        }),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidUrl {
            url: probe.url.clone(),
            reason: e.to_string(),
        }),
    }
}
