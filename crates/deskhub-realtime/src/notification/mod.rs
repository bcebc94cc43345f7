//! Chat notification counting, alerting, and polling.

pub mod counts;
pub mod poll;
pub mod poller;

pub use counts::{ChatCounts, count_chats};
