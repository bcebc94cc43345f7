//! User profile settings.

pub mod store;

pub use store::UserProfileSettingsStore;
