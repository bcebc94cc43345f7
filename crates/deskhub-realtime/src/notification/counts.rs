//! Unanswered and forwarded chat counts.

use serde::{Deserialize, Serialize};

use deskhub_core::types::UserId;
use deskhub_entity::chat::ChatSummary;
use deskhub_entity::notification::ChatSignal;

/// Counts shown next to the header badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCounts {
    /// Chats nobody has picked up.
    pub unanswered: usize,
    /// Chats forwarded to the viewer.
    pub forwarded: usize,
}

impl ChatCounts {
    /// The count driving alerts for `signal`.
    pub fn get(&self, signal: ChatSignal) -> usize {
        match signal {
            ChatSignal::NewChat => self.unanswered,
            ChatSignal::ForwardedChat => self.forwarded,
        }
    }
}

/// Count the chats relevant to `viewer`.
pub fn count_chats(chats: &[ChatSummary], viewer: &UserId) -> ChatCounts {
    chats.iter().fold(ChatCounts::default(), |mut counts, chat| {
        if chat.is_unanswered() {
            counts.unanswered += 1;
        }
        if chat.is_forwarded_to(viewer) {
            counts.forwarded += 1;
        }
        counts
    })
}
