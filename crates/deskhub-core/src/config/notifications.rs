//! Chat notification configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Chat polling and alert repetition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Interval in milliseconds at which alerts repeat while a count stays above zero.
    #[serde(default = "default_repeat_interval")]
    pub repeat_interval_ms: u64,
    /// Interval in milliseconds between chat list refreshes.
    #[serde(default = "default_poll_interval")]
    pub chat_poll_interval_ms: u64,
}

impl NotificationsConfig {
    /// Repeat interval as a [`Duration`].
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }

    /// Poll interval as a [`Duration`].
    pub fn chat_poll_interval(&self) -> Duration {
        Duration::from_millis(self.chat_poll_interval_ms)
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            repeat_interval_ms: default_repeat_interval(),
            chat_poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_repeat_interval() -> u64 {
    120_000
}

fn default_poll_interval() -> u64 {
    5_000
}
