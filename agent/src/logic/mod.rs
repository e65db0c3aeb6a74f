//! Logic Module - agent engines
//!
//! - `monitor/` - load sampling and isolation-forest anomaly check
//! - `classifier/` - filename triage (CRITICAL / JUNK)
//! - `uploader/` - AES-GCM sealing and vault upload
//! - `poller` - controller command polling and attack windows
//! - `agent/` - the NORMAL / UNDER_ATTACK state machine tying it together

pub mod agent;
pub mod classifier;
pub mod config;
pub mod error;
pub mod link;
pub mod monitor;
pub mod poller;
pub mod uploader;
