//! Shared coordination stores
//!
//! Each store owns its data behind its own lock or atomic; handlers only
//! reach them through the `Controller`.

pub mod command;
pub mod node_state;
pub mod ring_log;
pub mod vault;

pub use command::CommandChannel;
pub use node_state::StateStore;
pub use ring_log::RingLog;
pub use vault::{VaultError, VaultStore};
