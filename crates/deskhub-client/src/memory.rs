//! In-process backend for tests and offline runs.
//!
//! State is scripted up front and every write is recorded so callers can
//! assert on what was sent.

use std::sync::Mutex;

use async_trait::async_trait;

use deskhub_core::error::AppError;
use deskhub_core::result::AppResult;
use deskhub_core::types::UserId;
use deskhub_entity::chat::ChatSummary;
use deskhub_entity::notification::NotificationPreferences;

use crate::backend::{
    ChatSource, PreferencesBackend, PresenceActivity, PresenceBackend, PresenceUpdate, RoleSource,
    SessionBackend, SessionToken,
};

#[derive(Debug, Default)]
struct State {
    chats: Vec<ChatSummary>,
    preferences: Option<NotificationPreferences>,
    presence: Option<PresenceActivity>,
    authorities: Vec<String>,
    token: Option<SessionToken>,
    presence_updates: Vec<PresenceUpdate>,
    saved_preferences: Vec<NotificationPreferences>,
    extend_calls: usize,
    logout_calls: usize,
    fetch_calls: usize,
    fail_presence: bool,
    fail_preferences: bool,
    fail_session: bool,
}

/// Scriptable backend implementing every backend trait.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    /// Replace the active chat list.
    pub fn set_chats(&self, chats: Vec<ChatSummary>) {
        self.with_state(|s| s.chats = chats);
    }

    /// Replace the stored preferences record.
    pub fn set_preferences(&self, preferences: Option<NotificationPreferences>) {
        self.with_state(|s| s.preferences = preferences);
    }

    /// Replace the stored presence.
    pub fn set_presence(&self, presence: Option<PresenceActivity>) {
        self.with_state(|s| s.presence = presence);
    }

    /// Replace the viewer's authorities.
    pub fn set_authorities<I, S>(&self, authorities: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = authorities.into_iter().map(Into::into).collect();
        self.with_state(|s| s.authorities = list);
    }

    /// Token handed out by the next session extension.
    pub fn set_token(&self, token: Option<SessionToken>) {
        self.with_state(|s| s.token = token);
    }

    /// Make presence reads and writes fail.
    pub fn fail_presence(&self, fail: bool) {
        self.with_state(|s| s.fail_presence = fail);
    }

    /// Make preference reads and writes fail.
    pub fn fail_preferences(&self, fail: bool) {
        self.with_state(|s| s.fail_preferences = fail);
    }

    /// Make session extension and logout fail.
    pub fn fail_session(&self, fail: bool) {
        self.with_state(|s| s.fail_session = fail);
    }

    /// Every presence write received, oldest first.
    pub fn presence_updates(&self) -> Vec<PresenceUpdate> {
        self.with_state(|s| s.presence_updates.clone())
    }

    /// Every preferences record saved, oldest first.
    pub fn saved_preferences(&self) -> Vec<NotificationPreferences> {
        self.with_state(|s| s.saved_preferences.clone())
    }

    /// Number of session-extend calls.
    pub fn extend_calls(&self) -> usize {
        self.with_state(|s| s.extend_calls)
    }

    /// Number of logout calls.
    pub fn logout_calls(&self) -> usize {
        self.with_state(|s| s.logout_calls)
    }

    /// Number of preference fetches.
    pub fn fetch_calls(&self) -> usize {
        self.with_state(|s| s.fetch_calls)
    }
}

#[async_trait]
impl ChatSource for InMemoryBackend {
    async fn active_chats(&self) -> AppResult<Vec<ChatSummary>> {
        Ok(self.with_state(|s| s.chats.clone()))
    }
}

#[async_trait]
impl PreferencesBackend for InMemoryBackend {
    async fn fetch_preferences(
        &self,
        _user_id: &UserId,
    ) -> AppResult<Option<NotificationPreferences>> {
        self.with_state(|s| {
            s.fetch_calls += 1;
            if s.fail_preferences {
                return Err(AppError::network("profile settings unavailable"));
            }
            Ok(s.preferences)
        })
    }

    async fn save_preferences(
        &self,
        _user_id: &UserId,
        preferences: &NotificationPreferences,
    ) -> AppResult<()> {
        self.with_state(|s| {
            if s.fail_preferences {
                return Err(AppError::network("profile settings unavailable"));
            }
            s.saved_preferences.push(*preferences);
            s.preferences = Some(*preferences);
            Ok(())
        })
    }
}

#[async_trait]
impl PresenceBackend for InMemoryBackend {
    async fn current_presence(&self) -> AppResult<Option<PresenceActivity>> {
        self.with_state(|s| {
            if s.fail_presence {
                return Err(AppError::network("customer support activity unavailable"));
            }
            Ok(s.presence)
        })
    }

    async fn update_presence(&self, update: &PresenceUpdate) -> AppResult<()> {
        self.with_state(|s| {
            if s.fail_presence {
                return Err(AppError::network("customer support activity unavailable"));
            }
            s.presence_updates.push(update.clone());
            s.presence = Some(PresenceActivity {
                status: update.status,
                active: update.active,
            });
            Ok(())
        })
    }
}

#[async_trait]
impl SessionBackend for InMemoryBackend {
    async fn extend_session(&self) -> AppResult<Option<SessionToken>> {
        self.with_state(|s| {
            s.extend_calls += 1;
            if s.fail_session {
                return Err(AppError::network("session extension failed"));
            }
            Ok(s.token.clone())
        })
    }

    async fn logout(&self) -> AppResult<()> {
        self.with_state(|s| {
            s.logout_calls += 1;
            if s.fail_session {
                return Err(AppError::network("logout failed"));
            }
            Ok(())
        })
    }
}

#[async_trait]
impl RoleSource for InMemoryBackend {
    async fn authorities(&self) -> AppResult<Vec<String>> {
        Ok(self.with_state(|s| s.authorities.clone()))
    }
}
