use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `auto_approve` or `review_queue`.
    pub allocation_policy: &'static str,
}

/// GET /health -- service, database, and allocation mode.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = donation_db::health_check(&state.pool).await.is_ok();
    let status = if db_healthy { "ok" } else { "degraded" };
    let allocation_policy = if state.engine.policy().is_auto_approve() {
        "auto_approve"
    } else {
        "review_queue"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        allocation_policy,
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
