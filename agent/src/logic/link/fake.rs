//! In-memory `ControllerLink` that records every call

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::{Command, ControllerLink, EventKind, MetricsReport};
use crate::logic::error::AgentError;

#[derive(Default)]
pub struct RecordingLink {
    pub commands: Mutex<VecDeque<Result<Command, AgentError>>>,
    pub metrics: Mutex<Vec<MetricsReport>>,
    pub events: Mutex<Vec<(String, EventKind)>>,
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
    pub fail_uploads: Mutex<bool>,
}

impl RecordingLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next `get_command` (IDLE once drained)
    pub fn queue_command(&self, cmd: Result<Command, AgentError>) {
        self.commands.lock().push_back(cmd);
    }

    pub fn upload_names(&self) -> Vec<String> {
        self.uploads.lock().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn dropped_names(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|(_, kind)| *kind == EventKind::Dropped)
            .map(|(msg, _)| msg.clone())
            .collect()
    }

    pub fn last_metrics(&self) -> Option<MetricsReport> {
        self.metrics.lock().last().cloned()
    }
}

impl ControllerLink for RecordingLink {
    async fn get_command(&self) -> Result<Command, AgentError> {
        self.commands.lock().pop_front().unwrap_or(Ok(Command::Idle))
    }

    async fn push_metrics(&self, report: &MetricsReport) -> Result<(), AgentError> {
        self.metrics.lock().push(report.clone());
        Ok(())
    }

    async fn push_event(&self, msg: &str, kind: EventKind) -> Result<(), AgentError> {
        self.events.lock().push((msg.to_string(), kind));
        Ok(())
    }

    async fn upload_blob(&self, name: &str, blob: Vec<u8>) -> Result<(), AgentError> {
        if *self.fail_uploads.lock() {
            return Err(AgentError::Unreachable("connection refused".to_string()));
        }
        self.uploads.lock().push((name.to_string(), blob));
        Ok(())
    }
}
