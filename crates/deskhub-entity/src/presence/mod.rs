//! Presence domain entities.

pub mod color;

pub use color::StatusColor;

use serde::{Deserialize, Serialize};

/// Presence status of a customer-support agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    /// Agent is at the console.
    Online,
    /// Agent has been inactive for longer than the idle timeout.
    Idle,
    /// Agent switched themselves away.
    Offline,
}

impl PresenceStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::Offline => "offline",
        }
    }

    /// Display color for the status badge.
    pub fn color(&self) -> StatusColor {
        StatusColor::for_status(*self)
    }
}

impl Default for PresenceStatus {
    fn default() -> Self {
        Self::Online
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresenceStatus {
    type Err = deskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "idle" => Ok(Self::Idle),
            "offline" | "away" => Ok(Self::Offline),
            _ => Err(deskhub_core::AppError::validation(format!(
                "Invalid presence status: '{s}'"
            ))),
        }
    }
}
