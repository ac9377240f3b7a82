//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the coordinator URL, health path and timeout
//! - Validate the optional status bind address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NodeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::NodeConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("coordinator url must not be empty")]
    EmptyCoordinatorUrl,

    #[error("coordinator url '{url}' is invalid: {reason}")]
    InvalidCoordinatorUrl { url: String, reason: String },

    #[error("coordinator url '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("health path '{0}' must start with '/'")]
    InvalidHealthPath(String),

    #[error("probe timeout must be greater than zero")]
    ZeroTimeout,

    #[error("node id must not be empty")]
    EmptyNodeId,

    #[error("status address '{0}' is not a valid socket address")]
    InvalidStatusAddress(String),
}

/// Validate a fully resolved configuration.
pub fn validate_config(config: &NodeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let url = config.coordinator.url.trim();
    if url.is_empty() {
        errors.push(ValidationError::EmptyCoordinatorUrl);
    } else {
        match url::Url::parse(url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    errors.push(ValidationError::UnsupportedScheme(url.to_string()));
                } else if parsed.host_str().map_or(true, str::is_empty) {
                    errors.push(ValidationError::InvalidCoordinatorUrl {
                        url: url.to_string(),
                        reason: "missing host".to_string(),
                    });
                }
            }
            Err(e) => errors.push(ValidationError::InvalidCoordinatorUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    if !config.coordinator.health_path.starts_with('/') {
        errors.push(ValidationError::InvalidHealthPath(
            config.coordinator.health_path.clone(),
        ));
    }

    if config.coordinator.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.node.id.trim().is_empty() {
        errors.push(ValidationError::EmptyNodeId);
    }

    if let Some(addr) = &config.status.bind_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidStatusAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
