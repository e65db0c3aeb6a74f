//! Controller Link - agent to controller communication
//!
//! The agent loop only talks to the controller through `ControllerLink`,
//! which keeps the loop drivable by an in-memory double in tests.

pub mod client;
#[cfg(test)]
pub mod fake;

use serde::{Deserialize, Serialize};

use super::error::AgentError;

pub use client::ControllerClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Command {
    Idle,
    Attack,
}

#[derive(Debug, Deserialize)]
pub struct CommandResponse {
    pub cmd: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeStatus {
    Up,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub server: String,
    pub cpu: f64,
    pub ram: f64,
    pub status: NodeStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Info,
    Dropped,
}

#[derive(Debug, Serialize)]
pub struct LogEventRequest<'a> {
    pub msg: &'a str,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

#[allow(async_fn_in_trait)]
pub trait ControllerLink {
    /// Read (and consume) the controller's current command
    async fn get_command(&self) -> Result<Command, AgentError>;

    /// Push this node's latest metrics
    async fn push_metrics(&self, report: &MetricsReport) -> Result<(), AgentError>;

    /// Append an entry to the controller's event log
    async fn push_event(&self, msg: &str, kind: EventKind) -> Result<(), AgentError>;

    /// Ship an encrypted blob to the vault
    async fn upload_blob(&self, name: &str, blob: Vec<u8>) -> Result<(), AgentError>;
}
