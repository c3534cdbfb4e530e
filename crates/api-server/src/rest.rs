//! Operational endpoints: health, readiness and liveness checks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use brew_management::models::StoreCounts;
use brew_management::CafeStore;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for operational handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CafeStore>,
    pub node_id: String,
    pub start_time: Instant,
}

/// GET /health — Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness check for Kubernetes.
/// Reports the table sizes so an empty store can be told apart from a seeded one.
pub async fn readiness(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        ready: true,
        tables: state.store.counts(),
    })
}

/// GET /live — Liveness check for Kubernetes.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub tables: StoreCounts,
}
