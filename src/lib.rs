//! StreamrP2P node client library.
//!
//! Bootstrap for a stream-relay node: resolve configuration, verify that
//! the coordinator is alive, then hold a ready state until told to stop.

pub mod cli;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::NodeConfig;
pub use health::{CoordinatorProbe, ProbeError};
pub use lifecycle::Shutdown;

/// Crate version reported by `-version` and in startup logs.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit identifier injected at build time through `STREAMR_NODE_COMMIT`.
pub const COMMIT: &str = match option_env!("STREAMR_NODE_COMMIT") {
    Some(commit) => commit,
    None => "dev",
};
