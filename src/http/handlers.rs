//! Probe and status handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Serialize)]
pub struct LivenessStatus {
    pub status: &'static str,
    pub detail: &'static str,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub entity_path: String,
    pub subscription: String,
    pub failure_threshold: u32,
    pub alive: bool,
}

/// Liveness verdict for the orchestrator's probe: 200 while the
/// subscription connection is considered alive, 503 once it is not.
pub async fn get_liveness(State(state): State<AppState>) -> impl IntoResponse {
    let alive = state.monitor.is_alive();
    metrics::record_liveness_check(alive);

    if alive {
        (
            StatusCode::OK,
            Json(LivenessStatus {
                status: "healthy",
                detail: "subscription connection is healthy",
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(LivenessStatus {
                status: "degraded",
                detail: "no connection established to subscription topic",
            }),
        )
    }
}

/// Operator-facing snapshot, consumed by the CLI.
pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        entity_path: state.entity_path.clone(),
        subscription: state.subscription.clone(),
        failure_threshold: state.monitor.failure_threshold(),
        alive: state.monitor.is_alive(),
    })
}
