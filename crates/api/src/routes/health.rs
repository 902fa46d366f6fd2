use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Name reported by the health endpoint.
const SERVICE_NAME: &str = "lustre-api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Storefront API and catalog database both reachable.
    Ok,
    /// API is up but the catalog database is not answering.
    Degraded,
}

/// Liveness report for the storefront API.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: HealthStatus,
    pub version: &'static str,
    /// Whether the catalog/order database answered a ping.
    pub db_healthy: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match lustre_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog database unreachable");
            false
        }
    };

    Json(HealthResponse {
        service: SERVICE_NAME,
        status: if db_healthy {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mounted at the root, outside `/api/v1`, so probes need no prefix.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
