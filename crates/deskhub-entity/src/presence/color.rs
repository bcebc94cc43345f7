//! Status keyword to badge color lookup.

use serde::{Deserialize, Serialize};

use super::PresenceStatus;

/// Badge color for a presence status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    /// Online.
    Green,
    /// Idle.
    Amber,
    /// Offline.
    Red,
}

impl StatusColor {
    /// Color for a status.
    pub fn for_status(status: PresenceStatus) -> Self {
        match status {
            PresenceStatus::Online => Self::Green,
            PresenceStatus::Idle => Self::Amber,
            PresenceStatus::Offline => Self::Red,
        }
    }

    /// Color for a status keyword; unknown keywords get the offline color.
    pub fn for_keyword(keyword: &str) -> Self {
        keyword
            .parse::<PresenceStatus>()
            .map(Self::for_status)
            .unwrap_or(Self::Red)
    }

    /// CSS hex value.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#308653",
            Self::Amber => "#FFB511",
            Self::Red => "#D73E3E",
        }
    }
}
