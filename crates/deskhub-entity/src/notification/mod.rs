//! Notification preference entities.

pub mod preference;

pub use preference::{ChatSignal, NotificationPreferences, PreferenceKey, SignalPreferences};
