//! Root-level health check.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database answered the connectivity probe.
    pub db_healthy: bool,
}

/// GET /health
///
/// Reports service liveness and database reachability. A failing
/// database degrades the status instead of failing the request, so load
/// balancers can distinguish "down" from "up but unhealthy".
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = festivo_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        service: "festivo-api",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount health check routes (root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
