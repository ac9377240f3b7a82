//! Coordinator liveness probe.
//!
//! # Responsibilities
//! - Issue exactly one `GET {coordinator}{health_path}`
//! - Classify the outcome as healthy, unreachable or unhealthy
//!
//! # Design Decisions
//! - Single attempt, no retry or backoff: startup fails fast
//! - Explicit timeout covering connect and response
//! - Only status 200 counts as healthy; redirects are not followed
//! - Connections are not pooled, so nothing stays open after the check

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::CoordinatorConfig;

/// Why a liveness probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No response was received (connect refused, DNS failure, timeout).
    #[error("health check request to {url} failed")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived with a status other than 200.
    #[error("health check failed with status {status}")]
    UnhealthyStatus { url: String, status: u16 },

    /// The HTTP client could not be constructed.
    #[error("failed to build health check client")]
    Client(#[source] reqwest::Error),
}

impl ProbeError {
    /// Status code observed, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeError::UnhealthyStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Liveness probe bound to one coordinator endpoint.
#[derive(Debug, Clone)]
pub struct CoordinatorProbe {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl CoordinatorProbe {
    pub fn new(config: &CoordinatorConfig) -> Result<Self, ProbeError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(Policy::none())
            .pool_max_idle_per_host(0)
            .no_proxy()
            .user_agent(concat!("streamr-node/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProbeError::Client)?;

        Ok(Self {
            client,
            url: config.health_url(),
            timeout,
        })
    }

    /// The full URL this probe requests.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform the check once.
    pub async fn check(&self) -> Result<(), ProbeError> {
        tracing::debug!(
            url = %self.url,
            timeout_secs = self.timeout.as_secs(),
            "Probing coordinator"
        );

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| ProbeError::Connectivity {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        // Release the body before classifying.
        drop(response);

        tracing::debug!(url = %self.url, status = status.as_u16(), "Coordinator responded");

        if status != StatusCode::OK {
            return Err(ProbeError::UnhealthyStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator(url: &str) -> CoordinatorConfig {
        CoordinatorConfig {
            url: url.to_string(),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_probe_targets_health_path() {
        let probe = CoordinatorProbe::new(&coordinator("http://localhost:8000")).unwrap();
        assert_eq!(probe.url(), "http://localhost:8000/health");
        assert_eq!(probe.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_unhealthy_status_display() {
        let err = ProbeError::UnhealthyStatus {
            url: "http://localhost:8000/health".into(),
            status: 503,
        };
        assert_eq!(err.to_string(), "health check failed with status 503");
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_refused_connection_is_connectivity_error() {
        // Bind then drop to find a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = CoordinatorProbe::new(&coordinator(&format!("http://{}", addr))).unwrap();
        let err = probe.check().await.unwrap_err();

        assert!(matches!(err, ProbeError::Connectivity { .. }));
        assert_eq!(err.status(), None);
        assert!(std::error::Error::source(&err).is_some());
    }
}
