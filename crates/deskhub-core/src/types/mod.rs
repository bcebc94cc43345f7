//! Shared value types: typed identifiers and user-visible notices.

pub mod id;
pub mod notice;

pub use id::{ChatId, NoticeId, UserId};
pub use notice::{Notice, NoticeLevel};
