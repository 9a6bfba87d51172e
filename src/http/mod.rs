//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (net::bind)
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign x-request-id)
//!     → GET /healthz → readiness snapshot
//!     → response.rs (200 / 503 + JSON body)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::UuidRequestId;
pub use response::HealthReport;
pub use server::HttpServer;
