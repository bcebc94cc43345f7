//! Presence configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Idle detection and status confirmation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Inactivity in milliseconds before the status turns idle.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_ms: u64,
    /// Seconds after a manual switch to away before the confirmation modal opens.
    #[serde(default = "default_countdown")]
    pub confirmation_countdown_seconds: u32,
}

impl PresenceConfig {
    /// Idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: default_idle_timeout(),
            confirmation_countdown_seconds: default_countdown(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    300_000
}

fn default_countdown() -> u32 {
    300
}
