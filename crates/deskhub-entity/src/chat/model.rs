//! Chat summary as seen by the header.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskhub_core::types::{ChatId, UserId};

/// Lifecycle status of a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatStatus {
    /// Chat is open.
    Open,
    /// Chat was forwarded to another agent.
    Redirected,
    /// Chat is waiting on the customer.
    Idle,
    /// Chat has ended.
    Ended,
    /// A status this console does not know about.
    #[serde(other)]
    Unknown,
}

/// Minimal view of an active chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    /// Chat identifier.
    pub id: ChatId,
    /// Current status.
    pub status: ChatStatus,
    /// Assigned agent, `None` when nobody has picked the chat up.
    pub customer_support_id: Option<UserId>,
    /// When the chat was created, if known.
    pub created: Option<DateTime<Utc>>,
}

impl ChatSummary {
    /// Whether no agent has been assigned.
    pub fn is_unanswered(&self) -> bool {
        self.customer_support_id.is_none()
    }

    /// Whether the chat was forwarded to `viewer`.
    pub fn is_forwarded_to(&self, viewer: &UserId) -> bool {
        self.status == ChatStatus::Redirected && self.customer_support_id.as_ref() == Some(viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(status: ChatStatus, agent: Option<&str>) -> ChatSummary {
        ChatSummary {
            id: ChatId::new(),
            status,
            customer_support_id: UserId::from_optional(agent),
            created: None,
        }
    }

    #[test]
    fn test_forwarded_requires_redirect_and_viewer() {
        let me = UserId::new("EE1").unwrap();
        assert!(chat(ChatStatus::Redirected, Some("EE1")).is_forwarded_to(&me));
        assert!(!chat(ChatStatus::Open, Some("EE1")).is_forwarded_to(&me));
        assert!(!chat(ChatStatus::Redirected, Some("EE2")).is_forwarded_to(&me));
        assert!(!chat(ChatStatus::Redirected, None).is_forwarded_to(&me));
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: ChatStatus = serde_json::from_str("\"VALIDATING\"").unwrap();
        assert_eq!(status, ChatStatus::Unknown);
    }
}
