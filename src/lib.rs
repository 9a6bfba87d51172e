//! Service process lifecycle and liveness supervision.
//!
//! - The service side binds the listener and answers `GET /healthz`.
//! - The supervisor side probes that endpoint every 20s with a 3s deadline
//!   and reports unhealthy after 3 consecutive failures.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use health::{HealthStatus, Readiness, Supervisor};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
