//! Agent-facing handlers: command polling, metrics, events, blob upload

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::models::{Ack, Command, CommandResponse, LogEvent, LogEventRequest, MetricsReport};
use crate::store::VaultError;
use crate::{AppError, AppResult, AppState};

/// Multipart part carrying the encrypted blob
const UPLOAD_FIELD: &str = "file";

/// Poll the command channel (consumes ATTACK)
pub async fn get_command(State(state): State<AppState>) -> Json<CommandResponse> {
    let cmd = state.controller.poll_command();
    if cmd == Command::Attack {
        tracing::info!("ATTACK command handed to polling agent");
    }
    Json(CommandResponse { cmd })
}

/// Record a node's latest metrics
pub async fn report_metrics(
    State(state): State<AppState>,
    Json(req): Json<MetricsReport>,
) -> AppResult<Json<Ack>> {
    req.validate()?;

    let metrics = req.into_metrics(Utc::now());
    tracing::debug!(
        "Metrics from {}: cpu={:.1} ram={:.1} status={:?}",
        metrics.node_id, metrics.cpu, metrics.ram, metrics.status
    );
    state.controller.record_metrics(metrics);

    Ok(Json(Ack::new("received")))
}

/// Append an agent event to the ring
pub async fn log_event(
    State(state): State<AppState>,
    Json(req): Json<LogEventRequest>,
) -> Json<Ack> {
    state.controller.log_event(LogEvent::now(req.msg, req.kind));
    Json(Ack::new("logged"))
}

/// Receive an encrypted blob and store it in the vault
pub async fn upload_backup(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Ack>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::ValidationError("Upload is missing a filename".to_string()))?;
        let bytes = field.bytes().await?;

        let controller = state.controller.clone();
        let blob_name = name.clone();
        let size = tokio::task::spawn_blocking(move || controller.ingest_blob(&blob_name, &bytes))
            .await?
            .map_err(|e| match e {
                VaultError::Io(io) => AppError::WriteFailure(io.to_string()),
                other => other.into(),
            })?;

        tracing::info!("Vault secured {} ({} bytes)", name, size);
        return Ok(Json(Ack::new("saved")));
    }

    Err(AppError::ValidationError(format!("Missing multipart part '{}'", UPLOAD_FIELD)))
}
