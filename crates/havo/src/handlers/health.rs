//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Cache write health (503 while writes keep failing)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Cache write health.
///
/// A cache that silently rejects writes still serves every request through
/// the provider, so this is the only place the failure becomes visible.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    let status = state.engine.write_status();
    let code = if status.degraded {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (code, Json(serde_json::json!({ "cache_writes": status }))).into_response()
}
