//! Per-user notification and autocorrect preferences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two chat counters the header alerts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSignal {
    /// Chats nobody has picked up yet.
    NewChat,
    /// Chats forwarded to the viewer.
    ForwardedChat,
}

impl ChatSignal {
    /// Return the signal as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewChat => "new_chat",
            Self::ForwardedChat => "forwarded_chat",
        }
    }
}

impl fmt::Display for ChatSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flat preference record for one signed-in user.
///
/// Field names follow the backend's camelCase keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    /// Popup on forwarded chats.
    pub forwarded_chat_popup_notifications: bool,
    /// Sound on forwarded chats.
    pub forwarded_chat_sound_notifications: bool,
    /// Email on forwarded chats.
    pub forwarded_chat_email_notifications: bool,
    /// Popup on new chats.
    pub new_chat_popup_notifications: bool,
    /// Sound on new chats.
    pub new_chat_sound_notifications: bool,
    /// Email on new chats.
    pub new_chat_email_notifications: bool,
    /// Autocorrect in the chat composer.
    pub use_autocorrect: bool,
}

/// Users without a stored record hear both sound cues and get nothing else
/// besides autocorrect.
impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            forwarded_chat_popup_notifications: false,
            forwarded_chat_sound_notifications: true,
            forwarded_chat_email_notifications: false,
            new_chat_popup_notifications: false,
            new_chat_sound_notifications: true,
            new_chat_email_notifications: false,
            use_autocorrect: true,
        }
    }
}

/// The sound/popup/email toggles for a single signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalPreferences {
    /// Play a sound cue.
    pub sound: bool,
    /// Show a popup.
    pub popup: bool,
    /// Send an email (dispatched by the backend).
    pub email: bool,
}

impl SignalPreferences {
    /// Popups only appear when email notifications are on as well.
    pub fn shows_popup(&self) -> bool {
        self.email && self.popup
    }
}

impl NotificationPreferences {
    /// Read one field.
    pub fn get(&self, key: PreferenceKey) -> bool {
        match key {
            PreferenceKey::ForwardedChatPopupNotifications => self.forwarded_chat_popup_notifications,
            PreferenceKey::ForwardedChatSoundNotifications => self.forwarded_chat_sound_notifications,
            PreferenceKey::ForwardedChatEmailNotifications => self.forwarded_chat_email_notifications,
            PreferenceKey::NewChatPopupNotifications => self.new_chat_popup_notifications,
            PreferenceKey::NewChatSoundNotifications => self.new_chat_sound_notifications,
            PreferenceKey::NewChatEmailNotifications => self.new_chat_email_notifications,
            PreferenceKey::UseAutocorrect => self.use_autocorrect,
        }
    }

    /// Return a copy with exactly one field replaced.
    pub fn with(mut self, key: PreferenceKey, value: bool) -> Self {
        let field = match key {
            PreferenceKey::ForwardedChatPopupNotifications => {
                &mut self.forwarded_chat_popup_notifications
            }
            PreferenceKey::ForwardedChatSoundNotifications => {
                &mut self.forwarded_chat_sound_notifications
            }
            PreferenceKey::ForwardedChatEmailNotifications => {
                &mut self.forwarded_chat_email_notifications
            }
            PreferenceKey::NewChatPopupNotifications => &mut self.new_chat_popup_notifications,
            PreferenceKey::NewChatSoundNotifications => &mut self.new_chat_sound_notifications,
            PreferenceKey::NewChatEmailNotifications => &mut self.new_chat_email_notifications,
            PreferenceKey::UseAutocorrect => &mut self.use_autocorrect,
        };
        *field = value;
        self
    }

    /// The toggles that govern alerts for `signal`.
    pub fn for_signal(&self, signal: ChatSignal) -> SignalPreferences {
        match signal {
            ChatSignal::NewChat => SignalPreferences {
                sound: self.new_chat_sound_notifications,
                popup: self.new_chat_popup_notifications,
                email: self.new_chat_email_notifications,
            },
            ChatSignal::ForwardedChat => SignalPreferences {
                sound: self.forwarded_chat_sound_notifications,
                popup: self.forwarded_chat_popup_notifications,
                email: self.forwarded_chat_email_notifications,
            },
        }
    }
}

/// Names of the individual preference fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferenceKey {
    /// `forwardedChatPopupNotifications`
    ForwardedChatPopupNotifications,
    /// `forwardedChatSoundNotifications`
    ForwardedChatSoundNotifications,
    /// `forwardedChatEmailNotifications`
    ForwardedChatEmailNotifications,
    /// `newChatPopupNotifications`
    NewChatPopupNotifications,
    /// `newChatSoundNotifications`
    NewChatSoundNotifications,
    /// `newChatEmailNotifications`
    NewChatEmailNotifications,
    /// `useAutocorrect`
    UseAutocorrect,
}

impl PreferenceKey {
    /// Every key.
    pub const ALL: [PreferenceKey; 7] = [
        Self::ForwardedChatPopupNotifications,
        Self::ForwardedChatSoundNotifications,
        Self::ForwardedChatEmailNotifications,
        Self::NewChatPopupNotifications,
        Self::NewChatSoundNotifications,
        Self::NewChatEmailNotifications,
        Self::UseAutocorrect,
    ];

    /// Backend field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForwardedChatPopupNotifications => "forwardedChatPopupNotifications",
            Self::ForwardedChatSoundNotifications => "forwardedChatSoundNotifications",
            Self::ForwardedChatEmailNotifications => "forwardedChatEmailNotifications",
            Self::NewChatPopupNotifications => "newChatPopupNotifications",
            Self::NewChatSoundNotifications => "newChatSoundNotifications",
            Self::NewChatEmailNotifications => "newChatEmailNotifications",
            Self::UseAutocorrect => "useAutocorrect",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = deskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                deskhub_core::AppError::validation(format!("Unknown preference key: '{s}'"))
            })
    }
}
