//! Dashboard handlers: aggregated state, attack trigger, reset

use axum::{extract::State, Json};

use crate::models::{Ack, StateResponse};
use crate::{AppResult, AppState};

/// Node metrics and recent events
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(StateResponse {
        servers: state.controller.nodes(),
        logs: state.controller.events(),
    })
}

/// Arm the ATTACK command for the next polling agent
pub async fn trigger_attack(State(state): State<AppState>) -> Json<Ack> {
    state.controller.trigger_attack();
    tracing::warn!("COMMAND OVERRIDE: attack simulation triggered");
    Json(Ack::new("Attack signal broadcasted"))
}

/// Clear events and vault, disarm the command channel
pub async fn reset_system(State(state): State<AppState>) -> AppResult<Json<Ack>> {
    let controller = state.controller.clone();
    tokio::task::spawn_blocking(move || controller.reset()).await??;
    Ok(Json(Ack::new("cleared")))
}
