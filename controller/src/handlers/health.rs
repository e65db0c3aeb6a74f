//! Liveness plus a coarse view of the coordination stores

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    nodes: usize,
    events: usize,
    vault_reachable: bool,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (nodes, events, vault_reachable) = state.controller.health();
    if !vault_reachable {
        tracing::warn!("Vault directory {} is missing", state.config.vault_dir.display());
    }

    Json(HealthResponse {
        status: if vault_reachable { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        nodes,
        events,
        vault_reachable,
    })
}
