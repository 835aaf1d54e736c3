//! Health endpoint server.
//!
//! # Responsibilities
//! - Create the Axum router for the probe and status endpoints
//! - Wire up middleware (timeout, tracing)
//! - Serve until shutdown is signalled
//!
//! # Design Decisions
//! - Pull model only: the orchestrator polls, nothing is pushed
//! - Probe endpoints are unauthenticated; they expose a verdict, not data

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::SubwatchConfig;
use crate::http::handlers;
use crate::monitor::SubscriptionMonitor;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub monitor: Arc<SubscriptionMonitor>,
    pub entity_path: String,
    pub subscription: String,
}

/// HTTP server exposing the liveness probe.
pub struct HealthServer {
    router: Router,
}

impl HealthServer {
    pub fn new(
        config: &SubwatchConfig,
        monitor: Arc<SubscriptionMonitor>,
        subscription: String,
    ) -> Self {
        let state = AppState {
            monitor,
            entity_path: config.broker.entity_path.clone(),
            subscription,
        };

        let router = Router::new()
            .route("/health/liveness", get(handlers::get_liveness))
            .route("/status", get(handlers::get_status))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Serve on the given listener until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "health server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("health server stopped");
        Ok(())
    }
}
