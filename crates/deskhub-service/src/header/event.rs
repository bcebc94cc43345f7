//! Inputs processed by the header actor.

use deskhub_entity::chat::ChatSummary;
use deskhub_entity::notification::PreferenceKey;
use deskhub_entity::presence::PresenceStatus;
use deskhub_realtime::ActivitySignal;

/// Everything that can happen to the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderEvent {
    /// The idle detector crossed an edge.
    Activity(ActivitySignal),
    /// A fresh chat list arrived.
    ChatsRefreshed(Vec<ChatSummary>),
    /// The availability toggle: `true` is online, `false` is away.
    AvailabilityToggled(bool),
    /// An explicit status change.
    StatusChanged(PresenceStatus),
    /// The user confirmed they are back online.
    ConfirmOnline,
    /// The user dismissed the confirmation modal.
    CancelConfirmation,
    /// The user reopened the confirmation modal.
    ReopenConfirmation,
    /// One second of the away countdown elapsed. Carries the countdown generation.
    CountdownTick(u64),
    /// Open the settings drawer.
    OpenDrawer,
    /// Close the settings drawer.
    CloseDrawer,
    /// Toggle one preference.
    PreferenceChanged(PreferenceKey, bool),
    /// A background preference load or save finished.
    PreferencesSettled,
    /// Log out.
    Logout,
    /// Stop the actor.
    Shutdown,
}

impl From<ActivitySignal> for HeaderEvent {
    fn from(signal: ActivitySignal) -> Self {
        Self::Activity(signal)
    }
}

impl From<Vec<ChatSummary>> for HeaderEvent {
    fn from(chats: Vec<ChatSummary>) -> Self {
        Self::ChatsRefreshed(chats)
    }
}
