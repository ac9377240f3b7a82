//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the node.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Coordinator address used when nothing else is configured.
pub const DEFAULT_COORDINATOR_URL: &str =
    "http://streamr-p2p-beta-alb-1130353833.eu-west-1.elb.amazonaws.com";

/// Well-known liveness path on the coordinator.
pub const DEFAULT_HEALTH_PATH: &str = "/health";

/// Root configuration for the node client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NodeConfig {
    /// Node identity.
    pub node: NodeIdentity,

    /// Coordinator endpoint and probe settings.
    pub coordinator: CoordinatorConfig,

    /// Log verbosity.
    pub logging: LoggingConfig,

    /// Local status endpoint served once the node is ready.
    pub status: StatusConfig,
}

/// Node identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeIdentity {
    /// Identifier reported in logs and on the status endpoint.
    pub id: String,
}

impl Default for NodeIdentity {
    fn default() -> Self {
        Self {
            id: generate_node_id(),
        }
    }
}

/// Generate a short random identifier of the form `node_1a2b3c4d`.
pub fn generate_node_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("node_{}", &simple[..8])
}

/// Coordinator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Base URL (scheme + host). The health path is appended verbatim.
    pub url: String,

    /// Path probed for liveness.
    pub health_path: String,

    /// Probe timeout in seconds (connect + response).
    pub timeout_secs: u64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_COORDINATOR_URL.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            timeout_secs: 10,
        }
    }
}

impl CoordinatorConfig {
    /// Full URL of the liveness endpoint.
    pub fn health_url(&self) -> String {
        format!("{}{}", self.url, self.health_path)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Raise verbosity to debug.
    pub debug: bool,
}

/// Status endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StatusConfig {
    /// Bind address (e.g., "127.0.0.1:8080"). Disabled when unset.
    pub bind_address: Option<String>,
}
