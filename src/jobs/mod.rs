//! Periodic jobs: universe refresh, indicator refresh, signal check, notifications

pub mod context;
pub mod handlers;
pub mod types;

pub use context::{BotState, JobContext};
pub use types::JobKind;
