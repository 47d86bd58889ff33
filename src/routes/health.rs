//! Health check endpoints
//!
//! - `/health` - Process status with version and uptime
//! - `/health/live` - Liveness probe
//!
//! Upstreams are not probed; a healthy gateway may still relay upstream errors.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

const HEALTHY: &str = "healthy";

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub timestamp: String,
}

/// Simple health response for liveness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: &'static str,
}

/// Full health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Liveness probe endpoint
pub async fn liveness_check() -> Json<SimpleHealthResponse> {
    Json(SimpleHealthResponse { status: HEALTHY })
}
