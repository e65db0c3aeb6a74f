//! Vault audit handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::models::{BlobInspection, VaultFilesResponse};
use crate::{AppResult, AppState};

/// List ciphertext blobs
pub async fn list_files(State(state): State<AppState>) -> AppResult<Json<VaultFilesResponse>> {
    let controller = state.controller.clone();
    let files = tokio::task::spawn_blocking(move || controller.vault_files()).await??;
    Ok(Json(VaultFilesResponse { files }))
}

/// Size and hex prefix of a blob
pub async fn inspect_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<BlobInspection>> {
    let controller = state.controller.clone();
    let inspection = tokio::task::spawn_blocking(move || controller.inspect_blob(&name)).await??;
    Ok(Json(inspection))
}
