//! Command model

use serde::{Deserialize, Serialize};

/// The single process-wide command handed to polling agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Command {
    Idle,
    Attack,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub cmd: Command,
}

/// Generic status acknowledgement (`{"status": "..."}`)
#[derive(Debug, Serialize)]
pub struct Ack {
    pub status: &'static str,
}

impl Ack {
    pub fn new(status: &'static str) -> Self {
        Self { status }
    }
}
