//! Command Poller
//!
//! Asks the controller for its command once per loop iteration. ATTACK
//! launches the external stress workload and opens an attack window; any
//! poll failure counts as IDLE for that iteration.

use std::time::{Duration, Instant};

use super::link::{Command, ControllerLink};

/// What opened an attack window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSource {
    /// ATTACK command from the controller
    Command,
    /// The local anomaly detector (only when configured authoritative)
    Detector,
}

/// Interval during which the agent treats itself as under attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackWindow {
    pub ends_at: Instant,
    pub source: WindowSource,
}

impl AttackWindow {
    pub fn open(now: Instant, duration: Duration, source: WindowSource) -> Self {
        Self { ends_at: now + duration, source }
    }

    pub fn is_active_at(&self, now: Instant) -> bool {
        now < self.ends_at
    }

    /// Push the end out to `ends_at` if that is later
    pub fn extend_to(&mut self, ends_at: Instant) {
        if ends_at > self.ends_at {
            self.ends_at = ends_at;
        }
    }
}

/// Opaque load generator fired on ATTACK
pub trait StressWorkload {
    fn launch(&self);
}

/// Runs a shell command, detached
pub struct ShellStress {
    command: String,
}

impl ShellStress {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl StressWorkload for ShellStress {
    fn launch(&self) {
        #[cfg(target_os = "windows")]
        let mut cmd = {
            let mut c = tokio::process::Command::new("cmd");
            c.args(["/C", self.command.as_str()]);
            c
        };
        #[cfg(not(target_os = "windows"))]
        let mut cmd = {
            let mut c = tokio::process::Command::new("sh");
            c.args(["-c", self.command.as_str()]);
            c
        };

        cmd.stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null());

        match cmd.spawn() {
            Ok(mut child) => {
                log::info!("Stress workload launched: {}", self.command);
                // Reap in the background
                tokio::spawn(async move {
                    let _ = child.wait().await;
                });
            }
            Err(e) => log::warn!("Stress workload failed to start ({}): {}", self.command, e),
        }
    }
}

/// Stress disabled
pub struct NoStress;

impl StressWorkload for NoStress {
    fn launch(&self) {
        log::debug!("Stress workload disabled");
    }
}

pub struct CommandPoller {
    stress: Box<dyn StressWorkload + Send + Sync>,
    window: Duration,
}

impl CommandPoller {
    pub fn new(stress: Box<dyn StressWorkload + Send + Sync>, window: Duration) -> Self {
        Self { stress, window }
    }

    /// One poll. Returns a fresh window when the controller says ATTACK.
    pub async fn poll<L: ControllerLink>(&self, link: &L, now: Instant) -> Option<AttackWindow> {
        match link.get_command().await {
            Ok(Command::Attack) => {
                log::warn!("COMMAND RECEIVED: stress test initiated");
                self.stress.launch();
                Some(AttackWindow::open(now, self.window, WindowSource::Command))
            }
            Ok(Command::Idle) => None,
            Err(e) => {
                log::debug!("Command poll failed (treated as IDLE): {}", e);
                None
            }
        }
    }
}
