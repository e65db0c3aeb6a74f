//! Event log model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Info,
    Dropped,
    Success,
}

/// One entry of the controller's event ring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Controller wall clock, `HH:MM:SS`
    pub time: String,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

impl LogEvent {
    /// Build an event stamped with the current local time
    pub fn now(msg: impl Into<String>, kind: EventKind) -> Self {
        Self {
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            msg: msg.into(),
            kind,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogEventRequest {
    #[serde(default)]
    pub msg: String,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
}
