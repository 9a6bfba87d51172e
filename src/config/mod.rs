//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file ($SERVICE_CONFIG)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the container runs with no config at all
//! - Probe policy defaults are the fixed 20s / 3s / 3 contract

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ProbeConfig, ServiceConfig, TimeoutConfig,
    DEFAULT_PORT, HEALTHZ_PATH, PROBE_INTERVAL_SECS, PROBE_RETRIES, PROBE_TIMEOUT_SECS,
};
pub use validation::ValidationError;
