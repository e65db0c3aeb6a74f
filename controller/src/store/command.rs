//! Consume-once command channel

use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::Command;

/// Holds the single global command.
///
/// Reading ATTACK resets the channel to IDLE in the same atomic step, so for
/// one trigger exactly one poller observes ATTACK.
#[derive(Debug, Default)]
pub struct CommandChannel {
    armed: AtomicBool,
}

impl CommandChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the command to ATTACK. Repeated triggers before a poll collapse into one.
    pub fn trigger(&self) {
        self.armed.store(true, Ordering::Release);
    }

    /// Return the current command, clearing ATTACK back to IDLE.
    pub fn poll_and_consume(&self) -> Command {
        if self.armed.swap(false, Ordering::AcqRel) {
            Command::Attack
        } else {
            Command::Idle
        }
    }

    pub fn reset(&self) {
        self.armed.store(false, Ordering::Release);
    }
}
