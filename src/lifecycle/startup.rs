//! Startup orchestration.
//!
//! # Responsibilities
//! - Announce the resolved configuration
//! - Verify the coordinator before anything else starts
//! - Hold the Ready state until a shutdown signal arrives
//!
//! # Design Decisions
//! - Fail fast: a failed probe is returned, never retried
//! - Only the entry point turns an error into a process exit
//! - The status endpoint starts last (served only when ready)
//!
//! # Phases
//! ```text
//! (args parsed) → HelpShown
//!               → VersionShown
//!               → ConfiguringLog → ProbingCoordinator → Ready
//!                                                     → Failed
//! ```
//!
//! Argument parsing itself belongs to clap and happens before any phase is
//! entered; malformed flags exit from there.

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::{JoinError, JoinHandle};

use crate::config::NodeConfig;
use crate::health::{CoordinatorProbe, ProbeError};
use crate::http::{NodeInfo, StatusServer};
use crate::lifecycle::Shutdown;
use crate::{COMMIT, VERSION};

/// Bootstrap state after the command line has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    HelpShown,
    VersionShown,
    ConfiguringLog,
    ProbingCoordinator,
    Ready,
    Failed,
}

impl Phase {
    /// Whether the bootstrap sequence ends in this phase.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Phase::HelpShown | Phase::VersionShown | Phase::Ready | Phase::Failed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::HelpShown => "help_shown",
            Phase::VersionShown => "version_shown",
            Phase::ConfiguringLog => "configuring_log",
            Phase::ProbingCoordinator => "probing_coordinator",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record a phase transition.
pub fn enter(phase: Phase) {
    tracing::debug!(phase = %phase, terminal = phase.is_terminal(), "Bootstrap phase");
}

/// Errors that abort startup or the Ready state.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("failed to bind status endpoint on {address}")]
    StatusBind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("status endpoint failed")]
    StatusServer(#[source] std::io::Error),

    #[error("status endpoint task panicked")]
    StatusTask(#[from] JoinError),
}

impl StartupError {
    /// One-line summary used as the fatal log message.
    pub fn headline(&self) -> &'static str {
        match self {
            StartupError::Probe(_) => "Failed to connect to coordinator",
            _ => "Node client failed",
        }
    }
}

/// Check the coordinator once.
pub async fn verify_coordinator(config: &NodeConfig) -> Result<(), ProbeError> {
    enter(Phase::ProbingCoordinator);
    let probe = CoordinatorProbe::new(&config.coordinator)?;
    probe.check().await
}

/// Run the node from a resolved configuration until `shutdown_signal`
/// completes.
///
/// Logging must already be configured.
pub async fn run<F>(config: NodeConfig, shutdown_signal: F) -> Result<(), StartupError>
where
    F: Future<Output = ()>,
{
    tracing::info!(
        version = VERSION,
        commit = COMMIT,
        coordinator_url = %config.coordinator.url,
        node_id = %config.node.id,
        "Starting StreamrP2P Node Client"
    );

    if let Err(e) = verify_coordinator(&config).await {
        enter(Phase::Failed);
        return Err(e.into());
    }
    tracing::info!(
        coordinator_url = %config.coordinator.url,
        "Successfully connected to coordinator"
    );

    enter(Phase::Ready);
    let shutdown = Shutdown::new();
    let status_task = spawn_status_endpoint(&config, &shutdown).await?;

    tracing::info!(node_id = %config.node.id, "Node client ready, waiting for shutdown signal");

    tokio::pin!(shutdown_signal);
    match status_task {
        Some(mut task) => {
            tokio::select! {
                _ = &mut shutdown_signal => {
                    shutdown.trigger();
                    task.await?.map_err(StartupError::StatusServer)?;
                }
                joined = &mut task => {
                    joined?.map_err(StartupError::StatusServer)?;
                    shutdown_signal.await;
                }
            }
        }
        None => shutdown_signal.await,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn spawn_status_endpoint(
    config: &NodeConfig,
    shutdown: &Shutdown,
) -> Result<Option<JoinHandle<std::io::Result<()>>>, StartupError> {
    let Some(address) = &config.status.bind_address else {
        return Ok(None);
    };

    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::StatusBind {
            address: address.clone(),
            source,
        })?;

    let server = StatusServer::new(NodeInfo::from_config(config));
    Ok(Some(tokio::spawn(server.run(listener, shutdown.subscribe()))))
}
