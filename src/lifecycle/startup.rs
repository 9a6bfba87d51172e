//! Startup orchestration.
//!
//! # Responsibilities
//! - Start optional background pieces (metrics exporter)
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: a bind error is fatal and returned before anything is served
//! - Listener binds last, after everything it depends on is ready

use thiserror::Error;

use crate::config::{ConfigError, ServiceConfig};
use crate::health::Readiness;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::net::{self, ListenerError};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("listener error: {0}")]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind and serve until `shutdown` fires.
pub async fn run(
    config: ServiceConfig,
    readiness: Readiness,
    shutdown: Shutdown,
) -> Result<(), StartupError> {
    run_server(HttpServer::new(config, readiness), shutdown).await
}

/// Like [`run`], for an already built server (e.g. with application routes).
pub async fn run_server(server: HttpServer, shutdown: Shutdown) -> Result<(), StartupError> {
    let observability = &server.config().observability;
    if observability.metrics_enabled {
        match observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = net::bind(&server.config().listener).await?;

    server
        .run(listener, shutdown)
        .await
        .map_err(StartupError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_failure_is_returned_before_serving() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = ServiceConfig::default();
        config.listener.bind_address = taken.local_addr().unwrap().to_string();

        let err = run(config, Readiness::new(), Shutdown::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StartupError::Listener(ListenerError::Bind { .. })));
    }
}
