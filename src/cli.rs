//! Command-line surface.
//!
//! Flags are accepted in the single-dash long form used by earlier node
//! clients (`-coordinator URL`, `-debug`) as well as the usual double-dash
//! form. Help and version output are hand-written and short-circuit
//! everything else.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::config::ConfigOverrides;
use crate::lifecycle::Phase;
use crate::{COMMIT, VERSION};

/// Usage text printed by `-help`.
pub const HELP_TEXT: &str = "\
StreamrP2P Node Client - relay friends' streams and earn rewards

Usage:
  streamr-node [options]

Options:
  -coordinator string   URL of the coordinator service
  -debug                Enable debug logging
  -help                 Show this help message
  -version              Show version information
  -config path          Read settings from a TOML file
  -timeout-secs n       Coordinator health check timeout (default 10)
  -node-id string       Identifier reported by this node
  -status-addr addr     Serve /health and /status on this address once ready

Environment:
  STREAMR_COORDINATOR_URL   Same as -coordinator
  STREAMR_NODE_CONFIG       Same as -config
  STREAMR_NODE_ID           Same as -node-id
  RUST_LOG                  Log filter when -debug is not given

Examples:
  streamr-node
  streamr-node -debug
  streamr-node -coordinator http://localhost:8000
";

#[derive(Debug, Parser)]
#[command(name = "streamr-node")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// URL of the coordinator service
    #[arg(long, env = "STREAMR_COORDINATOR_URL", value_name = "URL", allow_hyphen_values = true)]
    pub coordinator: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Show this help message
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Show version information
    #[arg(long)]
    pub version: bool,

    /// Read settings from a TOML file
    #[arg(long, env = "STREAMR_NODE_CONFIG", value_name = "PATH", allow_hyphen_values = true)]
    pub config: Option<PathBuf>,

    /// Coordinator health check timeout in seconds
    #[arg(long, value_name = "SECS", allow_hyphen_values = true)]
    pub timeout_secs: Option<u64>,

    /// Identifier reported by this node
    #[arg(long, env = "STREAMR_NODE_ID", allow_hyphen_values = true)]
    pub node_id: Option<String>,

    /// Serve /health and /status on this address once ready
    #[arg(long, value_name = "ADDR", allow_hyphen_values = true)]
    pub status_addr: Option<String>,
}

impl Cli {
    /// Parse process arguments, exiting with a usage error if they are malformed.
    pub fn from_env() -> Self {
        match Self::try_parse_from(normalize_args(std::env::args_os())) {
            Ok(cli) => cli,
            Err(e) => e.exit(),
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            coordinator_url: self.coordinator.clone(),
            debug: self.debug,
            timeout_secs: self.timeout_secs,
            node_id: self.node_id.clone(),
            status_address: self.status_addr.clone(),
        }
    }
}

/// What the process was asked to do.
#[derive(Debug)]
pub enum Invocation {
    Help,
    Version,
    Run {
        config_path: Option<PathBuf>,
        overrides: ConfigOverrides,
    },
}

impl Invocation {
    /// Phase the bootstrap moves to after argument parsing.
    pub fn phase(&self) -> Phase {
        match self {
            Invocation::Help => Phase::HelpShown,
            Invocation::Version => Phase::VersionShown,
            Invocation::Run { .. } => Phase::ConfiguringLog,
        }
    }
}

impl From<Cli> for Invocation {
    fn from(cli: Cli) -> Self {
        if cli.help {
            return Invocation::Help;
        }
        if cli.version {
            return Invocation::Version;
        }
        let overrides = cli.overrides();
        Invocation::Run {
            config_path: cli.config,
            overrides,
        }
    }
}

/// Line printed by `-version`.
pub fn version_line() -> String {
    format!("StreamrP2P Node Client v{} ({})", VERSION, COMMIT)
}

/// Rewrite `-flag` and `-flag=value` into their `--` forms so clap accepts
/// them. Single-letter flags, everything after `--`, and the argument that
/// follows a value-taking flag are kept as given, so `-coordinator -debug`
/// uses `-debug` as the URL.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let value_flags = value_flags();
    let mut normalized = Vec::new();
    let mut passthrough = false;
    let mut pending_value = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || passthrough || pending_value {
            pending_value = false;
            normalized.push(arg);
            continue;
        }

        match arg.to_str() {
            Some("--") => {
                passthrough = true;
                normalized.push(arg);
            }
            Some(text) => {
                pending_value = awaits_value(text, &value_flags);
                if is_single_dash_long(text) {
                    normalized.push(format!("-{}", text).into());
                } else {
                    normalized.push(arg);
                }
            }
            None => normalized.push(arg),
        }
    }

    normalized
}

/// Long names of the flags that take a value.
fn value_flags() -> Vec<String> {
    Cli::command()
        .get_arguments()
        .filter(|arg| arg.get_action().takes_values())
        .filter_map(|arg| arg.get_long().map(str::to_string))
        .collect()
}

/// Whether `arg` is a value-taking flag whose value is the next argument.
fn awaits_value(arg: &str, value_flags: &[String]) -> bool {
    let name = arg.trim_start_matches('-');
    if name.len() == arg.len() || name.contains('=') {
        return false;
    }
    value_flags.iter().any(|flag| flag == name)
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split('=').next().unwrap_or(rest);
    name.len() > 1
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
