//! Chat domain entities.

pub mod model;

pub use model::{ChatStatus, ChatSummary};
