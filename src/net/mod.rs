//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (parse address, bind once)
//!     → Hand off to HTTP layer (axum::serve)
//! ```
//!
//! # Design Decisions
//! - Binding happens before any other work is accepted
//! - Bind errors surface to startup, which exits the process

pub mod listener;

pub use listener::{bind, ListenerError};
