//! Local status endpoint.
//!
//! # Responsibilities
//! - Create the Axum Router for `/health` and `/status`
//! - Bind to the configured listener once the node is ready
//! - Stop on the shutdown broadcast

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::NodeConfig;

/// Facts about this node exposed by `/status`.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub node_id: String,
    pub coordinator_url: String,
    pub started_at: Instant,
}

impl NodeInfo {
    pub fn from_config(config: &NodeConfig) -> Self {
        Self {
            node_id: config.node.id.clone(),
            coordinator_url: config.coordinator.url.clone(),
            started_at: Instant::now(),
        }
    }
}

/// Body of `GET /status`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub node_id: String,
    pub version: &'static str,
    pub commit: &'static str,
    pub coordinator_url: String,
    pub state: &'static str,
    pub uptime_secs: u64,
}

/// HTTP server for the node's status endpoint.
pub struct StatusServer {
    router: Router,
}

impl StatusServer {
    pub fn new(info: NodeInfo) -> Self {
        Self {
            router: Self::build_router(Arc::new(info)),
        }
    }

    fn build_router(info: Arc<NodeInfo>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/status", get(status_handler))
            .with_state(info)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for serving elsewhere or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Status endpoint listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Status endpoint stopped");
        Ok(())
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn status_handler(State(info): State<Arc<NodeInfo>>) -> Json<StatusReport> {
    Json(StatusReport {
        node_id: info.node_id.clone(),
        version: crate::VERSION,
        commit: crate::COMMIT,
        coordinator_url: info.coordinator_url.clone(),
        state: "ready",
        uptime_secs: info.started_at.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server() -> StatusServer {
        StatusServer::new(NodeInfo {
            node_id: "node_cafebabe".into(),
            coordinator_url: "http://localhost:8000".into(),
            started_at: Instant::now(),
        })
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = server()
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_status_route_reports_node() {
        let response = server()
            .router()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["node_id"], "node_cafebabe");
        assert_eq!(json["coordinator_url"], "http://localhost:8000");
        assert_eq!(json["state"], "ready");
        assert_eq!(json["version"], crate::VERSION);
        assert_eq!(json["commit"], crate::COMMIT);
        assert!(json["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = server()
            .router()
            .oneshot(Request::get("/streams").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = broadcast::channel(1);

        let handle = tokio::spawn(server().run(listener, rx));
        tx.send(()).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
