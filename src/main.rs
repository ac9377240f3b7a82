//! StreamrP2P node client.
//!
//! # Bootstrap Sequence
//!
//! ```text
//!   args ──▶ cli ──┬──▶ -help     ──▶ usage on stdout, exit 0
//!                  ├──▶ -version  ──▶ version line, exit 0
//!                  └──▶ config ──▶ logging ──▶ coordinator probe ──┬──▶ ready (until SIGINT/SIGTERM)
//!                                                                  └──▶ fatal log, exit 1
//! ```
//!
//! This is the only place that decides the process exit status.

use std::process::ExitCode;

use streamr_node::cli::{self, Cli, Invocation};
use streamr_node::config::loader::resolve_config;
use streamr_node::lifecycle::{signals, startup};
use streamr_node::observability::{ErrorChain, LogHandle};

/// Exit status for malformed flags and invalid configuration.
const USAGE_ERROR: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let invocation = Invocation::from(Cli::from_env());
    let phase = invocation.phase();
    let (config_path, overrides) = match invocation {
        Invocation::Help => {
            print!("{}", cli::HELP_TEXT);
            return ExitCode::SUCCESS;
        }
        Invocation::Version => {
            println!("{}", cli::version_line());
            return ExitCode::SUCCESS;
        }
        Invocation::Run {
            config_path,
            overrides,
        } => (config_path, overrides),
    };

    let config = match resolve_config(config_path.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", ErrorChain(&e));
            return ExitCode::from(USAGE_ERROR);
        }
    };

    if let Err(e) = LogHandle::new(config.logging.debug).install() {
        eprintln!("error: failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }
    startup::enter(phase);

    let shutdown_signal = async {
        let signal = signals::wait_for_termination().await;
        tracing::info!(signal = %signal, "Shutdown signal received");
    };

    match startup::run(config, shutdown_signal).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %ErrorChain(&e), "{}", e.headline());
            ExitCode::FAILURE
        }
    }
}
