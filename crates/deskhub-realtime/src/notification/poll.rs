//! Chat list refresh loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use deskhub_client::backend::ChatSource;
use deskhub_entity::chat::ChatSummary;

/// Fetch the active chat list every `period` and forward each list to `out`.
///
/// Fetch failures are logged and skipped. The loop ends when `out` closes.
pub async fn run_chat_poll<T>(
    source: Arc<dyn ChatSource>,
    period: Duration,
    out: mpsc::UnboundedSender<T>,
) where
    T: From<Vec<ChatSummary>> + Send + 'static,
{
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match source.active_chats().await {
            Ok(chats) => {
                debug!(count = chats.len(), "Chat list refreshed");
                if out.send(chats.into()).is_err() {
                    break;
                }
            }
            Err(e) => warn!("Chat list refresh failed: {}", e),
        }
    }

    debug!("Chat poll loop ended");
}
