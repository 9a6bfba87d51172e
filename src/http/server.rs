//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the `/healthz` handler
//! - Merge in the application's own routes, if any
//! - Wire up middleware (tracing, request ID, timeout)
//! - Serve on an already bound listener with graceful shutdown

use std::time::Duration;

use axum::{extract::State, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ServiceConfig, HEALTHZ_PATH};
use crate::health::Readiness;
use crate::http::request::UuidRequestId;
use crate::http::response::HealthReport;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// HTTP server for the service process.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// A server exposing only `/healthz`.
    pub fn new(config: ServiceConfig, readiness: Readiness) -> Self {
        Self::with_application(config, readiness, Router::new())
    }

    /// A server exposing `/healthz` next to the application's routes.
    ///
    /// # Panics
    /// If `application` already routes `/healthz`.
    pub fn with_application(config: ServiceConfig, readiness: Readiness, application: Router) -> Self {
        let router = Self::build_router(&config, readiness, application);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, readiness: Readiness, application: Router) -> Router {
        let health = Router::new()
            .route(HEALTHZ_PATH, get(healthz_handler))
            .with_state(readiness);

        application.merge(health).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server, accepting connections on the given listener, until
    /// `shutdown` fires. In-flight requests are drained before returning.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, path = HEALTHZ_PATH, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// `GET /healthz`.
///
/// Reads a snapshot of the readiness registry and nothing else, so it
/// answers on the normal request path even when the application is busy.
async fn healthz_handler(State(readiness): State<Readiness>) -> HealthReport {
    let report = HealthReport::from(readiness.snapshot());
    metrics::record_healthz(report.health());
    report
}
