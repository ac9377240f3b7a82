//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Consumers:
//!     → stderr (human-readable text, full timestamps)
//! ```
//!
//! # Design Decisions
//! - Structured fields (version, commit, coordinator_url) rather than
//!   interpolated strings
//! - One subscriber, built explicitly and installed by the entry point

pub mod logging;

pub use logging::{ErrorChain, LogHandle};
