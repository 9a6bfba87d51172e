//! Service process entry point.
//!
//! The container's sole runtime command. No flags or subcommands: config
//! comes from `$SERVICE_CONFIG` (optional TOML) and environment overrides.
//!
//! ```text
//!   orchestrator ──GET /healthz──▶ ┌──────────────────────────┐
//!   (or health-supervisor)         │  listener 0.0.0.0:8080    │
//!        ◀── 200 / 503 ─────────── │  /healthz → readiness     │
//!                                  │  app routes (external)    │
//!                                  └──────────────────────────┘
//! ```

use service_health::config;
use service_health::health::Readiness;
use service_health::lifecycle::{signals, startup, Shutdown};
use service_health::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_from_env()?;

    observability::init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "service-health starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    if let Err(e) = startup::run(config, Readiness::new(), shutdown).await {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
