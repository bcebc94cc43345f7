//! Backend traits consumed by the console core.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskhub_core::result::AppResult;
use deskhub_core::types::UserId;
use deskhub_entity::chat::ChatSummary;
use deskhub_entity::notification::NotificationPreferences;
use deskhub_entity::presence::PresenceStatus;

/// Body of a presence write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceUpdate {
    /// Whether the agent is accepting chats.
    pub active: bool,
    /// The agent.
    pub id: UserId,
    /// New status.
    pub status: PresenceStatus,
}

/// The agent's stored presence, as last persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceActivity {
    /// Stored status.
    pub status: PresenceStatus,
    /// Whether the agent was accepting chats.
    pub active: bool,
}

/// A session token handed out by the session-extend endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Opaque token value.
    pub value: String,
    /// Expiry, when the backend reports one.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Source of the active chat list.
#[async_trait]
pub trait ChatSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch every active chat.
    async fn active_chats(&self) -> AppResult<Vec<ChatSummary>>;
}

/// Storage for per-user notification preferences.
#[async_trait]
pub trait PreferencesBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a user's preferences; `None` when the backend has no record.
    async fn fetch_preferences(&self, user_id: &UserId)
    -> AppResult<Option<NotificationPreferences>>;

    /// Replace a user's preferences with the full record.
    async fn save_preferences(
        &self,
        user_id: &UserId,
        preferences: &NotificationPreferences,
    ) -> AppResult<()>;
}

/// Stores the agent's presence.
#[async_trait]
pub trait PresenceBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the signed-in agent's stored presence; `None` when there is none.
    async fn current_presence(&self) -> AppResult<Option<PresenceActivity>>;

    /// Persist a status change.
    async fn update_presence(&self, update: &PresenceUpdate) -> AppResult<()>;
}

/// Session lifecycle endpoints.
#[async_trait]
pub trait SessionBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Extend the current session; may hand out a fresh token.
    async fn extend_session(&self) -> AppResult<Option<SessionToken>>;

    /// End the current session.
    async fn logout(&self) -> AppResult<()>;
}

/// Yields the viewer's authorities.
#[async_trait]
pub trait RoleSource: Send + Sync + std::fmt::Debug + 'static {
    /// Raw authority names, primary first.
    async fn authorities(&self) -> AppResult<Vec<String>>;
}
