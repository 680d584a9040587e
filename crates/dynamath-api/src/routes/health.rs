//! Liveness endpoint for load balancers and deploy checks.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process can serve requests.
    pub status: &'static str,
    /// Crate version of the running binary.
    pub version: &'static str,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes for `/health`. Needs no template or seed state.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
