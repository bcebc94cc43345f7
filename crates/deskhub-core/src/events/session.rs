//! Session-related events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Events related to the signed-in user's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// The user went online and the session should be extended.
    ExtendRequested {
        /// The user ID.
        user_id: UserId,
    },
    /// The backend issued a fresh session token; a token store should persist it.
    TokenRefreshed {
        /// The user ID.
        user_id: UserId,
        /// The new token.
        token: String,
        /// When the token expires, if the backend said.
        expires_at: Option<DateTime<Utc>>,
    },
    /// The user logged out; the shell should navigate away.
    LoggedOut {
        /// The user ID.
        user_id: UserId,
    },
}
