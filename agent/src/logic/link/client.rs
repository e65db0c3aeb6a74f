//! Controller HTTP client

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use super::{Command, CommandResponse, ControllerLink, EventKind, LogEventRequest, MetricsReport};
use crate::constants;
use crate::logic::error::AgentError;

pub struct ControllerClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ControllerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AgentError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(|e| AgentError::Unreachable(format!("HTTP client init: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl ControllerLink for ControllerClient {
    async fn get_command(&self) -> Result<Command, AgentError> {
        let response = self.http_client
            .get(self.url("get_command"))
            .timeout(constants::POLL_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let body: CommandResponse = response.json().await?;
        Ok(body.cmd)
    }

    async fn push_metrics(&self, report: &MetricsReport) -> Result<(), AgentError> {
        self.http_client
            .post(self.url("metrics"))
            .timeout(constants::METRICS_TIMEOUT)
            .json(report)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn push_event(&self, msg: &str, kind: EventKind) -> Result<(), AgentError> {
        self.http_client
            .post(self.url("log_event"))
            .timeout(constants::LOG_EVENT_TIMEOUT)
            .json(&LogEventRequest { msg, kind })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn upload_blob(&self, name: &str, blob: Vec<u8>) -> Result<(), AgentError> {
        let part = Part::bytes(blob)
            .file_name(name.to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new().part("file", part);

        self.http_client
            .post(self.url("upload_backup"))
            .timeout(constants::UPLOAD_TIMEOUT)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
