//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Startup liveness check (probe.rs):
//!     Resolved coordinator config
//!     → GET {coordinator}/health
//!     → Ok(()) on 200, ProbeError otherwise
//! ```
//!
//! # Design Decisions
//! - The probe never terminates the process; callers decide what a
//!   failure means
//! - Transport failures and bad status codes are distinct error variants

pub mod probe;

pub use probe::{CoordinatorProbe, ProbeError};
