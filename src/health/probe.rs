//! Single liveness probe.
//!
//! # Responsibilities
//! - Issue one HTTP GET against the status endpoint
//! - Enforce a hard deadline on the whole exchange
//! - Classify the outcome; failures are values, never errors

use std::future::Future;
use std::time::{Duration, Instant, SystemTime};

use axum::body::Body;
use axum::http::{Request, StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::time;

/// How a single probe ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    /// `200 OK` before the deadline.
    Success,
    /// Deadline elapsed with no response.
    Timeout,
    /// Listener unreachable, refused, or dropped the connection.
    ConnectionError,
    /// Any status other than 200.
    UnexpectedStatus(u16),
}

impl ProbeOutcome {
    pub fn is_success(self) -> bool {
        self == ProbeOutcome::Success
    }

    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeOutcome::Success => "success",
            ProbeOutcome::Timeout => "timeout",
            ProbeOutcome::ConnectionError => "connection_error",
            ProbeOutcome::UnexpectedStatus(_) => "unexpected_status",
        }
    }
}

/// Result of one probe cycle.
#[derive(Debug, Clone, Copy)]
pub struct ProbeResult {
    pub timestamp: SystemTime,
    pub outcome: ProbeOutcome,
    pub latency: Duration,
}

impl ProbeResult {
    pub fn new(outcome: ProbeOutcome, latency: Duration) -> Self {
        Self {
            timestamp: SystemTime::now(),
            outcome,
            latency,
        }
    }
}

/// Something that can check liveness once.
pub trait Prober: Send + Sync {
    /// Run one probe. Must resolve within the prober's own deadline.
    fn probe_once(&self) -> impl Future<Output = ProbeResult> + Send;
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid probe URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: axum::http::uri::InvalidUri,
    },
}

/// HTTP GET prober.
///
/// Connections are not pooled: every probe dials the listener fresh, so a
/// restarted process is never judged through a stale connection.
#[derive(Clone)]
pub struct HttpProber {
    client: Client<HttpConnector, Body>,
    uri: Uri,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let uri: Uri = url.parse().map_err(|source| ProbeError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(HttpConnector::new());

        Ok(Self {
            client,
            uri,
            timeout,
        })
    }

    async fn send(&self) -> ProbeOutcome {
        let request = match Request::builder()
            .method("GET")
            .uri(self.uri.clone())
            .header("user-agent", "service-health-probe")
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build probe request");
                return ProbeOutcome::ConnectionError;
            }
        };

        // Dropping the response future on timeout abandons the request.
        match time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) if response.status() == StatusCode::OK => ProbeOutcome::Success,
            Ok(Ok(response)) => {
                tracing::warn!(uri = %self.uri, status = %response.status(), "Probe failed: unexpected status");
                ProbeOutcome::UnexpectedStatus(response.status().as_u16())
            }
            Ok(Err(e)) => {
                tracing::warn!(uri = %self.uri, error = %e, "Probe failed: connection error");
                ProbeOutcome::ConnectionError
            }
            Err(_) => {
                tracing::warn!(uri = %self.uri, timeout = ?self.timeout, "Probe failed: timeout");
                ProbeOutcome::Timeout
            }
        }
    }
}

impl Prober for HttpProber {
    async fn probe_once(&self) -> ProbeResult {
        let started = Instant::now();
        let outcome = self.send().await;
        let result = ProbeResult::new(outcome, started.elapsed());
        tracing::debug!(
            uri = %self.uri,
            outcome = outcome.as_str(),
            latency_ms = result.latency.as_millis() as u64,
            "Probe finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_url() {
        let err = HttpProber::new("http://[::1", Duration::from_secs(1)).err();
        assert!(matches!(err, Some(ProbeError::InvalidUrl { .. })));
    }

    #[test]
    fn only_success_is_success() {
        assert!(ProbeOutcome::Success.is_success());
        assert!(!ProbeOutcome::Timeout.is_success());
        assert!(!ProbeOutcome::ConnectionError.is_success());
        assert!(!ProbeOutcome::UnexpectedStatus(204).is_success());
    }

    #[tokio::test]
    async fn refused_connection_is_connection_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let prober = HttpProber::new(&format!("http://{}/healthz", addr), Duration::from_secs(1)).unwrap();
        let result = prober.probe_once().await;
        assert_eq!(result.outcome, ProbeOutcome::ConnectionError);
    }
}
