//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

use std::time::Duration;

/// Default controller URL
pub const DEFAULT_CONTROLLER_URL: &str = "http://127.0.0.1:8000";

/// Node id used when the hostname cannot be read
pub const FALLBACK_NODE_ID: &str = "server1";

/// Default directory scanned during an attack window
pub const DEFAULT_CRITICAL_DIR: &str = "./critical_data";

/// Default attack window duration (seconds)
pub const DEFAULT_ATTACK_WINDOW_SECS: u64 = 15;

/// Default external load generator launched on ATTACK
pub const DEFAULT_STRESS_COMMAND: &str = "stress --cpu 8 --timeout 15";

/// CPU value reported while under attack
pub const ATTACK_REPORTED_CPU: f64 = 100.0;

// Request timeouts
pub const POLL_TIMEOUT: Duration = Duration::from_millis(500);
pub const METRICS_TIMEOUT: Duration = Duration::from_secs(2);
pub const LOG_EVENT_TIMEOUT: Duration = Duration::from_secs(1);
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Window over which one CPU sample is measured
pub const CPU_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Pause before the first file of a window is triaged
pub const ANALYSIS_PAUSE: Duration = Duration::from_millis(1200);

/// Pacing after a file is secured
pub const CRITICAL_PACING: Duration = Duration::from_millis(1500);

/// Pacing after a file is dropped
pub const JUNK_PACING: Duration = Duration::from_millis(300);

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Aman-Q Agent";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get controller URL from environment or use default
pub fn get_controller_url() -> String {
    std::env::var("CONTROLLER_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_CONTROLLER_URL.to_string())
}

/// Get node id from environment, then hostname, then fallback
pub fn get_node_id() -> String {
    std::env::var("AGENT_NODE_ID")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            hostname::get()
                .ok()
                .map(|h| h.to_string_lossy().to_string())
                .filter(|h| !h.is_empty())
        })
        .unwrap_or_else(|| FALLBACK_NODE_ID.to_string())
}

/// Get critical data directory from environment or use default
pub fn get_critical_dir() -> String {
    std::env::var("AGENT_CRITICAL_DIR")
        .unwrap_or_else(|_| DEFAULT_CRITICAL_DIR.to_string())
}

/// Get attack window duration from environment or use default
pub fn get_attack_window_secs() -> u64 {
    std::env::var("AGENT_ATTACK_WINDOW_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ATTACK_WINDOW_SECS)
}

/// Get stress command from environment (empty string disables it)
pub fn get_stress_command() -> Option<String> {
    let cmd = std::env::var("AGENT_STRESS_COMMAND")
        .unwrap_or_else(|_| DEFAULT_STRESS_COMMAND.to_string());
    let cmd = cmd.trim().to_string();
    if cmd.is_empty() { None } else { Some(cmd) }
}

/// Check if the anomaly detector may open attack windows on its own
pub fn is_detector_authoritative() -> bool {
    std::env::var("AGENT_DETECTOR_AUTHORITATIVE")
        .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
        .unwrap_or(false)
}
