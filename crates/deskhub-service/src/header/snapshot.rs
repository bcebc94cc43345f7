//! Serializable view of the header state.

use serde::{Deserialize, Serialize};

use deskhub_auth::SettingsSection;
use deskhub_core::types::UserId;
use deskhub_entity::menu::MenuTree;
use deskhub_entity::notification::NotificationPreferences;
use deskhub_entity::presence::PresenceStatus;
use deskhub_entity::user::RoleAuthority;
use deskhub_realtime::notification::ChatCounts;

/// Everything a presentation layer needs to render the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSnapshot {
    pub user_id: UserId,
    pub role: Option<RoleAuthority>,
    pub status: PresenceStatus,
    /// Hex color of the status badge.
    pub status_color: String,
    /// Whether the agent accepts chats.
    pub active: bool,
    pub counts: ChatCounts,
    pub confirmation_open: bool,
    /// Seconds left before the confirmation modal opens, while counting down.
    pub countdown_remaining: Option<u32>,
    pub drawer_open: bool,
    pub menu: MenuTree,
    pub settings_sections: Vec<SettingsSection>,
    pub preferences: NotificationPreferences,
    pub logged_out: bool,
}

impl HeaderSnapshot {
    /// A snapshot with nothing known yet about `user_id`.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            role: None,
            status: PresenceStatus::Online,
            status_color: PresenceStatus::Online.color().hex().to_string(),
            active: false,
            counts: ChatCounts::default(),
            confirmation_open: false,
            countdown_remaining: None,
            drawer_open: false,
            menu: MenuTree::new(),
            settings_sections: Vec::new(),
            preferences: NotificationPreferences::default(),
            logged_out: false,
        }
    }
}
