//! # deskhub-service
//!
//! Application layer of the console header. Each component takes its
//! collaborators at construction time as `Arc` trait objects.
//!
//! - [`ViewerContext`]: who is looking at the console and in which role
//! - [`NoticeBoard`]: fans user-visible notices out to the presentation layer
//! - [`UserProfileSettingsStore`]: the viewer's notification preferences
//! - [`HeaderViewModel`]: the header actor composing everything above

pub mod context;
pub mod header;
pub mod notice;
pub mod settings;

pub use context::ViewerContext;
pub use header::{HeaderEvent, HeaderParts, HeaderSnapshot, HeaderViewModel};
pub use notice::NoticeBoard;
pub use settings::UserProfileSettingsStore;
