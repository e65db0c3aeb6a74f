//! Controller - composes the coordination stores
//!
//! The only owner of the command channel, node state, event ring and vault.
//! Ring appends and vault access hold `gate` shared; `reset` holds it
//! exclusively so it never interleaves with either.

use std::collections::BTreeMap;
use std::path::PathBuf;

use parking_lot::RwLock;

use crate::models::{BlobInspection, Command, EventKind, LogEvent, NodeMetrics};
use crate::store::{CommandChannel, RingLog, StateStore, VaultError, VaultStore};

pub struct Controller {
    commands: CommandChannel,
    nodes: StateStore,
    events: RingLog,
    vault: VaultStore,
    gate: RwLock<()>,
}

impl Controller {
    pub fn new(vault_dir: impl Into<PathBuf>) -> Result<Self, VaultError> {
        Ok(Self {
            commands: CommandChannel::new(),
            nodes: StateStore::new(),
            events: RingLog::new(),
            vault: VaultStore::open(vault_dir)?,
            gate: RwLock::new(()),
        })
    }

    // ---- command channel ----

    pub fn trigger_attack(&self) {
        self.commands.trigger();
    }

    pub fn poll_command(&self) -> Command {
        self.commands.poll_and_consume()
    }

    // ---- node state ----

    pub fn record_metrics(&self, metrics: NodeMetrics) {
        self.nodes.put(metrics.node_id.clone(), metrics);
    }

    pub fn nodes(&self) -> BTreeMap<String, NodeMetrics> {
        self.nodes.get_all()
    }

    // ---- event ring ----

    pub fn log_event(&self, event: LogEvent) {
        let _gate = self.gate.read();
        self.events.append(event);
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.get_all()
    }

    // ---- vault ----

    /// Store an uploaded blob and record the sync in the event ring
    pub fn ingest_blob(&self, name: &str, bytes: &[u8]) -> Result<u64, VaultError> {
        let _gate = self.gate.read();
        let size = self.vault.put(name, bytes)?;
        self.events
            .append(LogEvent::now(format!("{} [CLOUD SYNC]", name), EventKind::Success));
        Ok(size)
    }

    pub fn vault_files(&self) -> Result<Vec<String>, VaultError> {
        let _gate = self.gate.read();
        self.vault.list()
    }

    pub fn inspect_blob(&self, name: &str) -> Result<BlobInspection, VaultError> {
        let _gate = self.gate.read();
        self.vault.inspect(name)
    }

    /// Clear the event ring and vault and disarm the command channel.
    /// Node state survives a reset.
    /// Nothing else is touched when the vault clear fails.
    pub fn reset(&self) -> Result<(), VaultError> {
        let _gate = self.gate.write();
        let removed = self.vault.clear()?;
        self.events.clear();
        self.commands.reset();
        tracing::info!("System reset: {} vault blobs removed", removed);
        Ok(())
    }

    /// Node count, event count and whether the vault directory is there
    pub fn health(&self) -> (usize, usize, bool) {
        (
            self.nodes.get_all().len(),
            self.events.get_all().len(),
            self.vault.root().is_dir(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeStatus;
    use chrono::Utc;

    fn controller() -> (tempfile::TempDir, Controller) {
        let dir = tempfile::tempdir().unwrap();
        let controller = Controller::new(dir.path().join("vault")).unwrap();
        (dir, controller)
    }

    #[test]
    fn test_ingest_logs_success() {
        let (_dir, c) = controller();
        c.ingest_blob("id_rsa.enc", b"cipher").unwrap();

        let events = c.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].msg, "id_rsa.enc [CLOUD SYNC]");
        assert_eq!(events[0].kind, EventKind::Success);
    }

    #[test]
    fn test_failed_ingest_leaves_ring_untouched() {
        let (_dir, c) = controller();
        assert!(c.ingest_blob("../evil.enc", b"x").is_err());
        assert!(c.events().is_empty());
    }

    #[test]
    fn test_reset_keeps_nodes() {
        let (_dir, c) = controller();
        c.record_metrics(NodeMetrics {
            node_id: "server1".to_string(),
            cpu: 10.0,
            ram: 20.0,
            status: NodeStatus::Up,
            received_at: Utc::now(),
        });
        c.log_event(LogEvent::now("hello", EventKind::Info));
        c.ingest_blob("a.enc", b"1").unwrap();
        c.trigger_attack();

        c.reset().unwrap();

        assert!(c.vault_files().unwrap().is_empty());
        assert!(c.events().is_empty());
        assert_eq!(c.poll_command(), Command::Idle);
        assert!(c.nodes().contains_key("server1"));
    }

    #[test]
    fn test_reset_on_empty_system() {
        let (_dir, c) = controller();
        c.reset().unwrap();
        c.reset().unwrap();
        assert!(c.vault_files().unwrap().is_empty());
        assert!(c.events().is_empty());
        assert_eq!(c.poll_command(), Command::Idle);
    }

    #[test]
    fn test_failed_reset_leaves_state_intact() {
        let (dir, c) = controller();
        c.log_event(LogEvent::now("hello", EventKind::Info));
        c.ingest_blob("a.enc", b"1").unwrap();
        c.trigger_attack();

        // Vault root replaced by a plain file so the clear cannot list it
        let root = dir.path().join("vault");
        std::fs::remove_dir_all(&root).unwrap();
        std::fs::write(&root, b"not a directory").unwrap();

        assert!(c.reset().is_err());
        assert_eq!(c.events().len(), 2);
        assert_eq!(c.poll_command(), Command::Attack);
    }

    #[test]
    fn test_reset_with_vault_dir_gone() {
        let (dir, c) = controller();
        c.log_event(LogEvent::now("hello", EventKind::Info));
        c.trigger_attack();
        std::fs::remove_dir_all(dir.path().join("vault")).unwrap();

        c.reset().unwrap();
        assert!(c.events().is_empty());
        assert_eq!(c.poll_command(), Command::Idle);
        assert!(c.vault_files().unwrap().is_empty());
    }

    #[test]
    fn test_reset_never_splits_an_ingest() {
        use std::sync::Arc;
        use std::thread;

        let (_dir, c) = controller();
        let c = Arc::new(c);

        let mut workers = Vec::new();
        for t in 0..2 {
            let c = c.clone();
            workers.push(thread::spawn(move || {
                for i in 0..50 {
                    c.ingest_blob(&format!("t{}-{}.enc", t, i), b"cipher").unwrap();
                }
            }));
        }
        {
            let c = c.clone();
            workers.push(thread::spawn(move || {
                for i in 0..100 {
                    c.log_event(LogEvent::now(format!("tick {}", i), EventKind::Info));
                }
            }));
        }
        {
            let c = c.clone();
            workers.push(thread::spawn(move || {
                for _ in 0..20 {
                    c.reset().unwrap();
                    thread::yield_now();
                }
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }

        // A sync event in the ring always has its blob in the vault
        let files = c.vault_files().unwrap();
        for event in c.events() {
            if let Some(name) = event.msg.strip_suffix(" [CLOUD SYNC]") {
                assert!(files.iter().any(|f| f == name), "{} logged but not stored", name);
            }
        }
    }

    #[test]
    fn test_health_counts() {
        let (_dir, c) = controller();
        c.record_metrics(NodeMetrics {
            node_id: "server1".to_string(),
            cpu: 10.0,
            ram: 20.0,
            status: NodeStatus::Up,
            received_at: Utc::now(),
        });
        c.log_event(LogEvent::now("hello", EventKind::Info));
        assert_eq!(c.health(), (1, 1, true));
    }
}
