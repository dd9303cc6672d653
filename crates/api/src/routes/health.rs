//! Liveness and storage health, mounted at the root rather than `/api/v1`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `memory` in demo mode, `database` otherwise.
    pub storage: &'static str,
}

/// GET /health
///
/// 200 when the store answers, 503 otherwise. The body is the same shape
/// either way.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match taskboard_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Health check query failed");
            false
        }
    };

    let (status_code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage: if state.config.is_demo_mode() { "memory" } else { "database" },
    };
    (status_code, Json(body))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
