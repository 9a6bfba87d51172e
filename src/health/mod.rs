//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Service side (readiness.rs):
//!     Application updates component statuses
//!     → /healthz reads a snapshot → 200 / 503
//!
//! Supervisor side (active.rs):
//!     Periodic timer
//!     → probe.rs (one GET /healthz with deadline)
//!     → state.rs (failure streak → verdict)
//!     → watch channel → orchestrator
//! ```
//!
//! # Design Decisions
//! - The two sides share nothing but the network socket
//! - Probe failures are values that feed the streak, never errors
//! - Healthy → Unhealthy needs consecutive failures; one success recovers

pub mod active;
pub mod probe;
pub mod readiness;
pub mod state;

pub use active::Supervisor;
pub use probe::{HttpProber, ProbeError, ProbeOutcome, ProbeResult, Prober};
pub use readiness::{ComponentStatus, Readiness, ReadinessSnapshot};
pub use state::{HealthStatus, HealthTracker};
