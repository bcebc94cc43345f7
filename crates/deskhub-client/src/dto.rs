//! Wire payloads and their narrowing into domain entities.
//!
//! Every backend response arrives wrapped in `{"response": ...}`. Nothing
//! outside this module looks at raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;
use deskhub_core::types::{ChatId, UserId};
use deskhub_entity::chat::{ChatStatus, ChatSummary};
use deskhub_entity::notification::NotificationPreferences;
use deskhub_entity::presence::PresenceStatus;

use crate::backend::{PresenceActivity, SessionToken};

/// The `{"response": ...}` wrapper around every payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// The payload; absent or `null` means "nothing".
    pub response: Option<T>,
}

/// A chat as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDto {
    /// Chat UUID as a string.
    pub id: String,
    /// Status keyword.
    #[serde(default)]
    pub status: Option<ChatStatus>,
    /// Assigned agent, blank when unassigned.
    #[serde(default)]
    pub customer_support_id: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl TryFrom<ChatDto> for ChatSummary {
    type Error = AppError;

    fn try_from(dto: ChatDto) -> Result<Self, Self::Error> {
        let id: ChatId = dto
            .id
            .parse()
            .map_err(|e| AppError::invalid_response(format!("Invalid chat id '{}': {e}", dto.id)))?;
        Ok(ChatSummary {
            id,
            status: dto.status.unwrap_or(ChatStatus::Unknown),
            customer_support_id: UserId::from_optional(dto.customer_support_id.as_deref()),
            created: dto.created,
        })
    }
}

/// Narrow a chat list entry by entry, dropping entries that fail
/// validation so one bad row never hides the rest.
pub fn narrow_chats(rows: Vec<Value>) -> Vec<ChatSummary> {
    rows.into_iter()
        .filter_map(|row| {
            let narrowed = serde_json::from_value::<ChatDto>(row)
                .map_err(|e| AppError::invalid_response(format!("Malformed chat: {e}")))
                .and_then(ChatSummary::try_from);
            match narrowed {
                Ok(chat) => Some(chat),
                Err(e) => {
                    warn!("Dropping malformed chat: {}", e.message);
                    None
                }
            }
        })
        .collect()
}

/// Pick the single record out of a payload that may be an object, a
/// one-row array, an empty array, or `null`. The last two mean "no record".
fn single_record(value: Option<Value>, what: &str) -> AppResult<Option<Value>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(mut rows)) => {
            if rows.is_empty() {
                Ok(None)
            } else {
                Ok(Some(rows.swap_remove(0)))
            }
        }
        Some(obj @ Value::Object(_)) => Ok(Some(obj)),
        Some(other) => Err(AppError::invalid_response(format!(
            "Unexpected {what} payload: {other}"
        ))),
    }
}

/// Narrow a preferences payload.
pub fn narrow_preferences(value: Option<Value>) -> AppResult<Option<NotificationPreferences>> {
    let Some(record) = single_record(value, "preferences")? else {
        return Ok(None);
    };
    serde_json::from_value(record)
        .map(Some)
        .map_err(|e| AppError::invalid_response(format!("Malformed preferences: {e}")))
}

/// Stored presence as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceActivityDto {
    /// Status keyword.
    #[serde(default)]
    pub status: Option<String>,
    /// Boolean, or the strings `"true"` / `"false"`.
    #[serde(default)]
    pub active: Option<Value>,
}

impl PresenceActivityDto {
    /// A missing or unknown status narrows to offline, so a reload never
    /// turns an away agent online without confirmation.
    pub fn narrow(self) -> PresenceActivity {
        let status = match self.status.as_deref().map(str::parse::<PresenceStatus>) {
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                warn!("Unknown stored presence status: {}", e.message);
                PresenceStatus::Offline
            }
            None => PresenceStatus::Offline,
        };
        let active = match self.active {
            Some(Value::Bool(active)) => active,
            Some(Value::String(raw)) => raw.trim().eq_ignore_ascii_case("true"),
            _ => false,
        };
        PresenceActivity { status, active }
    }
}

/// Narrow a stored-presence payload.
pub fn narrow_presence_activity(value: Option<Value>) -> AppResult<Option<PresenceActivity>> {
    let Some(record) = single_record(value, "presence")? else {
        return Ok(None);
    };
    serde_json::from_value::<PresenceActivityDto>(record)
        .map(|dto| Some(dto.narrow()))
        .map_err(|e| AppError::invalid_response(format!("Malformed presence: {e}")))
}

/// Body of a preferences write: the full record plus its owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRecordDto<'a> {
    /// Owner.
    pub user_id: &'a UserId,
    /// The full record.
    #[serde(flatten)]
    pub preferences: &'a NotificationPreferences,
}

/// Session-extend payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenDto {
    /// Token value, possibly blank.
    #[serde(default)]
    pub token: Option<String>,
    /// Expiry.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionTokenDto {
    /// Blank tokens count as no token.
    pub fn narrow(self) -> Option<SessionToken> {
        let value = self.token.filter(|t| !t.trim().is_empty())?;
        Some(SessionToken {
            value,
            expires_at: self.expires_at,
        })
    }
}

/// Narrow a role list, dropping blanks.
pub fn narrow_authorities(raw: Option<Vec<String>>) -> Vec<String> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_narrowing() {
        let id = ChatId::new();
        let rows: Vec<Value> = serde_json::from_value(json!([
            {"id": id.to_string(), "status": "REDIRECTED", "customerSupportId": "EE1"},
            {"status": "OPEN"},
            {"id": ChatId::new().to_string(), "status": "OPEN", "customerSupportId": ""},
            {"id": 42, "status": "OPEN"},
            {"id": "garbage", "status": "OPEN"},
            "not an object",
        ]))
        .unwrap();
        let chats = narrow_chats(rows);
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].id, id);
        assert_eq!(chats[0].status, ChatStatus::Redirected);
        assert!(chats[1].is_unanswered());
    }

    #[test]
    fn test_preferences_shapes() {
        assert_eq!(narrow_preferences(None).unwrap(), None);
        assert_eq!(narrow_preferences(Some(Value::Null)).unwrap(), None);
        assert_eq!(narrow_preferences(Some(json!([]))).unwrap(), None);

        let prefs = narrow_preferences(Some(json!([{"newChatSoundNotifications": false}])))
            .unwrap()
            .unwrap();
        assert!(!prefs.new_chat_sound_notifications);
        assert!(prefs.forwarded_chat_sound_notifications);

        let prefs = narrow_preferences(Some(json!({"useAutocorrect": false})))
            .unwrap()
            .unwrap();
        assert!(!prefs.use_autocorrect);

        assert!(narrow_preferences(Some(json!("yes"))).is_err());
        assert!(narrow_preferences(Some(json!({"useAutocorrect": "maybe"}))).is_err());
    }

    #[test]
    fn test_presence_activity_shapes() {
        assert_eq!(narrow_presence_activity(Some(json!([]))).unwrap(), None);
        assert_eq!(narrow_presence_activity(None).unwrap(), None);

        let stored = narrow_presence_activity(Some(json!([{"status": "offline", "active": "true"}])))
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PresenceStatus::Offline);
        assert!(stored.active);

        let stored = narrow_presence_activity(Some(json!({"status": "idle", "active": false})))
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PresenceStatus::Idle);
        assert!(!stored.active);

        let stored = narrow_presence_activity(Some(json!({"status": "napping"})))
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PresenceStatus::Offline);
        assert!(!stored.active);

        assert!(narrow_presence_activity(Some(json!(7))).is_err());
    }

    #[test]
    fn test_preferences_record_is_flat() {
        let user_id = UserId::new("EE1").unwrap();
        let prefs = NotificationPreferences::default();
        let body = serde_json::to_value(PreferencesRecordDto {
            user_id: &user_id,
            preferences: &prefs,
        })
        .unwrap();
        assert_eq!(body["userId"], "EE1");
        assert_eq!(body["useAutocorrect"], true);
        assert_eq!(body["newChatPopupNotifications"], false);
    }

    #[test]
    fn test_blank_token_is_none() {
        let dto: SessionTokenDto = serde_json::from_value(json!({"token": " "})).unwrap();
        assert!(dto.narrow().is_none());
        let dto: SessionTokenDto = serde_json::from_value(json!({"token": "abc"})).unwrap();
        assert_eq!(dto.narrow().unwrap().value, "abc");
    }

    #[test]
    fn test_authorities() {
        assert_eq!(
            narrow_authorities(Some(vec![" ROLE_ANALYST ".into(), "".into()])),
            vec!["ROLE_ANALYST".to_string()]
        );
        assert!(narrow_authorities(None).is_empty());
    }
}
