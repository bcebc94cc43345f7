//! Cache key builders for all DeskHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the console uses.

use deskhub_core::types::UserId;

/// Prefix applied to all DeskHub cache keys.
const PREFIX: &str = "deskhub";

/// Cache key for a user's notification preferences.
pub fn preferences(user_id: &UserId) -> String {
    format!("{PREFIX}:preferences:{user_id}")
}

/// Cache key for a user's role authorities.
pub fn user_role(user_id: &UserId) -> String {
    format!("{PREFIX}:role:{user_id}")
}
