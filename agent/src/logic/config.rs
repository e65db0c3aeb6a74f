//! Agent Configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::constants;

/// Delays inserted between file operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Once per window, before the first file is triaged
    pub analysis_pause: Duration,
    /// After a file is encrypted and sent
    pub after_critical: Duration,
    /// After a file is dropped
    pub after_junk: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            analysis_pause: constants::ANALYSIS_PAUSE,
            after_critical: constants::CRITICAL_PACING,
            after_junk: constants::JUNK_PACING,
        }
    }
}

impl Pacing {
    /// No delays at all
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            analysis_pause: Duration::ZERO,
            after_critical: Duration::ZERO,
            after_junk: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Controller base URL
    pub controller_url: String,
    /// Identifier reported with every metrics push
    pub node_id: String,
    /// Directory triaged during an attack window
    pub critical_dir: PathBuf,
    /// Length of an attack window
    pub attack_window: Duration,
    /// External workload launched on ATTACK
    pub stress_command: Option<String>,
    /// Let the anomaly detector open windows on its own
    pub detector_authoritative: bool,
    pub pacing: Pacing,
}

impl AgentConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            controller_url: constants::get_controller_url(),
            node_id: constants::get_node_id(),
            critical_dir: PathBuf::from(constants::get_critical_dir()),
            attack_window: Duration::from_secs(constants::get_attack_window_secs()),
            stress_command: constants::get_stress_command(),
            detector_authoritative: constants::is_detector_authoritative(),
            pacing: Pacing::default(),
        }
    }
}
