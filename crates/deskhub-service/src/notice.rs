//! Broadcast notice board.

use tokio::sync::broadcast;
use tracing::{info, warn};

use deskhub_core::traits::NoticeSink;
use deskhub_core::types::{Notice, NoticeLevel};

/// Fans notices out to every subscriber.
///
/// Notices raised while nobody listens are logged and dropped.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBoard {
    /// Creates a board buffering up to `capacity` notices per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to future notices.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(32)
    }
}

impl NoticeSink for NoticeBoard {
    fn push(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error | NoticeLevel::Warning => {
                warn!(title = %notice.title, "{}", notice.message)
            }
            NoticeLevel::Info => info!(title = %notice.title, "{}", notice.message),
        }
        // No subscribers is fine; the log line above is enough.
        let _ = self.sender.send(notice);
    }
}
