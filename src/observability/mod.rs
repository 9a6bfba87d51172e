//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Service process and supervisor produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Container log driver (stdout)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
