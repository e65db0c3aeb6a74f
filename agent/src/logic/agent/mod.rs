//! Agent main control loop
//!
//! Two states:
//! - NORMAL: heartbeat with real CPU/RAM, status UP.
//! - UNDER_ATTACK: status CRITICAL with CPU pinned at 100, and every file in
//!   the critical directory not yet seen in this window is triaged once.
//!
//! Leaving UNDER_ATTACK clears the sent set, so the next window starts over.
//! Every failure is logged and absorbed inside the iteration.

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;
use std::time::Instant;

use tokio::time::sleep;

use super::classifier::{FileClassifier, Label};
use super::config::AgentConfig;
use super::link::{ControllerLink, EventKind, MetricsReport, NodeStatus};
use super::monitor::{AnomalyMonitor, LoadSample, LoadSampler};
use super::poller::{AttackWindow, CommandPoller, StressWorkload, WindowSource};
use super::uploader::SecureUploader;
use crate::constants;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Normal,
    UnderAttack,
}

pub struct Agent<L: ControllerLink> {
    config: AgentConfig,
    link: L,
    poller: CommandPoller,
    monitor: AnomalyMonitor,
    classifier: FileClassifier,
    uploader: SecureUploader,
    window: Option<AttackWindow>,
    sent: HashSet<String>,
}

impl<L: ControllerLink> Agent<L> {
    /// Build an agent, training both models
    pub fn new(config: AgentConfig, link: L, stress: Box<dyn StressWorkload + Send + Sync>) -> Self {
        Self::with_models(config, link, stress, AnomalyMonitor::train(), FileClassifier::train())
    }

    pub fn with_models(
        config: AgentConfig,
        link: L,
        stress: Box<dyn StressWorkload + Send + Sync>,
        monitor: AnomalyMonitor,
        classifier: FileClassifier,
    ) -> Self {
        let poller = CommandPoller::new(stress, config.attack_window);
        Self {
            config,
            link,
            poller,
            monitor,
            classifier,
            uploader: SecureUploader::new(),
            window: None,
            sent: HashSet::new(),
        }
    }

    pub fn state(&self) -> AgentState {
        if self.window.is_some() {
            AgentState::UnderAttack
        } else {
            AgentState::Normal
        }
    }

    #[cfg(test)]
    pub fn window(&self) -> Option<&AttackWindow> {
        self.window.as_ref()
    }

    #[cfg(test)]
    pub fn sent_files(&self) -> &HashSet<String> {
        &self.sent
    }

    #[cfg(test)]
    pub fn link(&self) -> &L {
        &self.link
    }

    #[cfg(test)]
    pub fn uploader(&self) -> &SecureUploader {
        &self.uploader
    }

    /// Loop until `shutdown` resolves
    pub async fn run<F>(&mut self, sampler: &mut LoadSampler, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Shutdown requested, agent loop stopping");
                    break;
                }
                _ = self.iteration(sampler) => {}
            }
        }
    }

    async fn iteration(&mut self, sampler: &mut LoadSampler) {
        self.poll_command(Instant::now()).await;
        let sample = sampler.sample().await;
        self.step(Instant::now(), sample).await;
    }

    /// Ask the controller for its command; ATTACK opens (or extends) the window
    pub async fn poll_command(&mut self, now: Instant) {
        self.expire_window(now);

        let Some(fresh) = self.poller.poll(&self.link, now).await else {
            return;
        };

        match self.window.as_mut() {
            Some(window) => {
                window.extend_to(fresh.ends_at);
                log::info!("Attack window extended");
            }
            None => self.open_window(fresh).await,
        }
    }

    /// One pass of the state machine with an already-taken load sample
    pub async fn step(&mut self, now: Instant, sample: LoadSample) {
        self.expire_window(now);

        let anomalous = self.monitor.check(sample.cpu, sample.ram);
        log::debug!("Load cpu {:.1}% ram {:.1}% anomalous={}", sample.cpu, sample.ram, anomalous);
        if anomalous && self.window.is_none() {
            if self.config.detector_authoritative {
                log::warn!("Detector flagged load (cpu {:.1}%), opening attack window", sample.cpu);
                let window = AttackWindow::open(now, self.config.attack_window, WindowSource::Detector);
                self.open_window(window).await;
            } else {
                log::warn!("Detector flagged load (cpu {:.1}%, ram {:.1}%) - advisory only", sample.cpu, sample.ram);
            }
        }

        match self.state() {
            AgentState::UnderAttack => self.defend(sample).await,
            AgentState::Normal => self.heartbeat(sample).await,
        }
    }

    fn expire_window(&mut self, now: Instant) {
        if let Some(window) = &self.window {
            if !window.is_active_at(now) {
                log::info!(
                    "Attack window closed ({} files triaged), back to NORMAL",
                    self.sent.len()
                );
                self.window = None;
                self.sent.clear();
            }
        }
    }

    async fn open_window(&mut self, window: AttackWindow) {
        let secs = window.ends_at.saturating_duration_since(Instant::now()).as_secs();
        log::warn!("UNDER ATTACK ({:?}), window open for ~{}s", window.source, secs);
        self.window = Some(window);

        let msg = format!("{}: attack window opened", self.config.node_id);
        if let Err(e) = self.link.push_event(&msg, EventKind::Info).await {
            log::warn!("Event push failed: {}", e);
        }
    }

    async fn heartbeat(&mut self, sample: LoadSample) {
        if !self.sent.is_empty() {
            self.sent.clear();
        }

        let report = MetricsReport {
            server: self.config.node_id.clone(),
            cpu: sample.cpu,
            ram: sample.ram,
            status: NodeStatus::Up,
        };
        if let Err(e) = self.link.push_metrics(&report).await {
            log::warn!("Heartbeat failed: {}", e);
        }
    }

    async fn defend(&mut self, sample: LoadSample) {
        log::warn!("THREAT DETECTED (real cpu {:.1}%)", sample.cpu);

        let report = MetricsReport {
            server: self.config.node_id.clone(),
            cpu: constants::ATTACK_REPORTED_CPU,
            ram: sample.ram,
            status: NodeStatus::Critical,
        };
        if let Err(e) = self.link.push_metrics(&report).await {
            log::warn!("Critical metrics push failed: {}", e);
        }

        if self.sent.is_empty() {
            log::info!("AI filtering data...");
            sleep(self.config.pacing.analysis_pause).await;
        }

        let files = match list_files(&self.config.critical_dir).await {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Cannot scan {}: {}", self.config.critical_dir.display(), e);
                return;
            }
        };

        for name in files {
            if self.sent.contains(&name) {
                continue;
            }
            self.triage(&name).await;
            self.sent.insert(name);
        }
    }

    /// Classify one file and route it
    async fn triage(&self, name: &str) {
        let path = self.config.critical_dir.join(name);

        match self.classifier.classify(name) {
            Label::Critical => {
                log::info!("CLASSIFIED CRITICAL: {}", name);
                if let Err(e) = self.uploader.upload(&self.link, &path).await {
                    log::warn!("Evacuation of {} failed: {}", name, e);
                }
                sleep(self.config.pacing.after_critical).await;
            }
            Label::Junk => {
                log::info!("CLASSIFIED JUNK: {}", name);
                if let Err(e) = self.uploader.report_dropped(&self.link, name).await {
                    log::warn!("Drop notice for {} failed: {}", name, e);
                }
                sleep(self.config.pacing.after_junk).await;
            }
        }
    }
}

/// Regular files directly under `dir`, sorted by name
async fn list_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}
