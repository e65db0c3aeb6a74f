//! Vault and dashboard response models

use std::collections::BTreeMap;

use serde::Serialize;

use super::{LogEvent, NodeMetrics};

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub servers: BTreeMap<String, NodeMetrics>,
    pub logs: Vec<LogEvent>,
}

#[derive(Debug, Serialize)]
pub struct VaultFilesResponse {
    pub files: Vec<String>,
}

/// Audit view of a stored blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobInspection {
    pub name: String,
    /// Hex of the first `INSPECT_PREFIX_LEN` bytes
    pub hex: String,
    pub size: u64,
    pub sha256: String,
}
