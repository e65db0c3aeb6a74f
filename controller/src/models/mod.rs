//! Data models

pub mod command;
pub mod event;
pub mod metrics;
pub mod vault;

pub use command::*;
pub use event::*;
pub use metrics::*;
pub use vault::*;
