//! Configuration loading and resolution.
//!
//! Precedence, highest first: command-line flags, environment variables
//! (resolved by the CLI layer), config file, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::NodeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values supplied on the command line or through the environment.
///
/// `None` means "not given", so the file or default value applies.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub coordinator_url: Option<String>,
    pub debug: bool,
    pub timeout_secs: Option<u64>,
    pub node_id: Option<String>,
    pub status_address: Option<String>,
}

impl ConfigOverrides {
    /// Apply the overrides on top of `config`.
    pub fn apply(self, config: &mut NodeConfig) {
        if let Some(url) = self.coordinator_url {
            config.coordinator.url = url;
        }
        if self.debug {
            config.logging.debug = true;
        }
        if let Some(secs) = self.timeout_secs {
            config.coordinator.timeout_secs = secs;
        }
        if let Some(id) = self.node_id {
            config.node.id = id;
        }
        if let Some(addr) = self.status_address {
            config.status.bind_address = Some(addr);
        }
    }
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<NodeConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Build the final configuration from an optional file plus overrides.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<NodeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => NodeConfig::default(),
    };
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<NodeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}
