//! Transient user-visible notices (toasts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::NoticeId;
use crate::error::AppError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Informational message.
    Info,
    /// Something degraded but the console keeps working.
    Warning,
    /// An operation failed.
    Error,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Notice identifier.
    pub id: NoticeId,
    /// Severity.
    pub level: NoticeLevel,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the notice was raised.
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    /// Create a notice with the given level.
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: NoticeId::new(),
            level,
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an info notice.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    /// Create an error notice carrying the failure message.
    pub fn from_error(title: impl Into<String>, err: &AppError) -> Self {
        Self::new(NoticeLevel::Error, title, err.message.clone())
    }
}
