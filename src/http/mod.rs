//! HTTP layer.
//!
//! Serves the node's own status endpoint once the coordinator check has
//! passed. Outbound coordinator traffic lives in `health::probe`.

pub mod server;

pub use server::{NodeInfo, StatusServer};
