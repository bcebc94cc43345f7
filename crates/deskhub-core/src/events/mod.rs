//! Events emitted by the console core for external collaborators.
//!
//! Side effects that do not belong to the component raising them (session
//! extension, token persistence, navigation after logout) travel as events
//! over an [`EventBus`] instead of being performed inline.

pub mod session;

use tokio::sync::broadcast;

pub use session::SessionEvent;

/// Fan-out bus for [`SessionEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Create a bus with the given buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn publish(&self, event: SessionEvent) -> usize {
        match self.sender.send(event) {
            Ok(n) => n,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(?event, "No subscribers for session event");
                0
            }
        }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
