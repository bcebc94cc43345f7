//! Extends the session whenever the agent comes online.
//!
//! Consumes [`SessionEvent::ExtendRequested`] from the bus, calls the
//! session backend, and publishes [`SessionEvent::TokenRefreshed`] for an
//! external token store. A missing token is not an error.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use deskhub_client::backend::SessionBackend;
use deskhub_core::events::{EventBus, SessionEvent};
use deskhub_core::traits::NoticeSink;
use deskhub_core::types::{Notice, UserId};

/// Background consumer of extension requests.
#[derive(Debug, Clone)]
pub struct SessionExtender {
    backend: Arc<dyn SessionBackend>,
    events: EventBus,
    notices: Arc<dyn NoticeSink>,
}

impl SessionExtender {
    /// Create an extender.
    pub fn new(
        backend: Arc<dyn SessionBackend>,
        events: EventBus,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            backend,
            events,
            notices,
        }
    }

    /// Subscribe and run until the bus closes or the user logs out.
    pub fn spawn(self) -> JoinHandle<()> {
        let rx = self.events.subscribe();
        tokio::spawn(self.run(rx))
    }

    async fn run(self, mut rx: tokio::sync::broadcast::Receiver<SessionEvent>) {
        loop {
            match rx.recv().await {
                Ok(SessionEvent::ExtendRequested { user_id }) => self.extend(user_id).await,
                Ok(SessionEvent::LoggedOut { .. }) => break,
                Ok(SessionEvent::TokenRefreshed { .. }) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Session extender lagged behind the event bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
        debug!("Session extender stopped");
    }

    /// Extend the session once.
    pub async fn extend(&self, user_id: UserId) {
        match self.backend.extend_session().await {
            Ok(Some(token)) => {
                info!(user_id = %user_id, "Session extended");
                self.events.publish(SessionEvent::TokenRefreshed {
                    user_id,
                    token: token.value,
                    expires_at: token.expires_at,
                });
            }
            Ok(None) => debug!(user_id = %user_id, "Session extended without a new token"),
            Err(e) => {
                warn!(user_id = %user_id, "Session extension failed: {}", e);
                self.notices
                    .push(Notice::from_error("Session extension failed", &e));
            }
        }
    }
}
