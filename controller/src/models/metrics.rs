//! Node metrics model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeStatus {
    Up,
    Critical,
}

/// Latest report of a single node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    #[serde(rename = "server")]
    pub node_id: String,
    pub cpu: f64,
    pub ram: f64,
    pub status: NodeStatus,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MetricsReport {
    #[validate(length(min = 1, max = 128))]
    pub server: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub cpu: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub ram: f64,
    pub status: NodeStatus,
}

impl MetricsReport {
    /// Stamp the report with the time it reached the controller
    pub fn into_metrics(self, received_at: DateTime<Utc>) -> NodeMetrics {
        NodeMetrics {
            node_id: self.server,
            cpu: self.cpu,
            ram: self.ram,
            status: self.status,
            received_at,
        }
    }
}
