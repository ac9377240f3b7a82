//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolved config → Probe coordinator → Ready (status endpoint)
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Status endpoint drains → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Leave the Ready state
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then probe, then listeners
//! - Nothing in here exits the process

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{Phase, StartupError};
