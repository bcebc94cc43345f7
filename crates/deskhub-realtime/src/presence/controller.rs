//! Presence status lifecycle.
//!
//! The controller owns the agent's status and mirrors every change to the
//! presence backend. Local state is never rolled back when a write fails;
//! the failure becomes an error notice instead.

use std::sync::Arc;

use tracing::{debug, info, warn};

use deskhub_client::backend::{PresenceBackend, PresenceUpdate};
use deskhub_core::events::{EventBus, SessionEvent};
use deskhub_core::result::AppResult;
use deskhub_core::traits::NoticeSink;
use deskhub_core::types::{Notice, UserId};
use deskhub_entity::presence::PresenceStatus;

/// Result of feeding an activity edge into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceOutcome {
    /// Nothing changed.
    Unchanged,
    /// Status moved to the given value.
    Changed(PresenceStatus),
    /// The agent is away; going online needs explicit confirmation.
    ConfirmationRequired,
}

/// Drives online/idle/offline transitions for one agent.
#[derive(Debug)]
pub struct IdlePresenceController {
    user_id: UserId,
    status: PresenceStatus,
    /// The "accepting chats" flag sent with every write.
    active: bool,
    backend: Arc<dyn PresenceBackend>,
    events: EventBus,
    notices: Arc<dyn NoticeSink>,
}

impl IdlePresenceController {
    /// Create a controller starting online and not accepting chats, until
    /// [`restore`](Self::restore) reads the stored presence.
    pub fn new(
        user_id: UserId,
        backend: Arc<dyn PresenceBackend>,
        events: EventBus,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            user_id,
            status: PresenceStatus::Online,
            active: false,
            backend,
            events,
            notices,
        }
    }

    /// Adopt the stored presence without writing it back.
    ///
    /// No stored record means online and not accepting chats. A failed read
    /// raises a notice and keeps the current state.
    pub async fn restore(&mut self) -> AppResult<()> {
        match self.backend.current_presence().await {
            Ok(Some(stored)) => {
                self.status = stored.status;
                self.active = stored.active;
                info!(user_id = %self.user_id, status = %stored.status, active = stored.active, "Presence restored");
                Ok(())
            }
            Ok(None) => {
                self.status = PresenceStatus::Online;
                self.active = false;
                debug!(user_id = %self.user_id, "No stored presence, starting online");
                Ok(())
            }
            Err(e) => {
                warn!(user_id = %self.user_id, "Loading presence failed: {}", e);
                self.notices
                    .push(Notice::from_error("Loading status failed", &e));
                Err(e)
            }
        }
    }

    /// Current status.
    pub fn status(&self) -> PresenceStatus {
        self.status
    }

    /// Whether the agent accepts chats.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The idle timeout elapsed.
    pub async fn on_idle(&mut self) -> PresenceOutcome {
        if self.status == PresenceStatus::Offline {
            return PresenceOutcome::Unchanged;
        }
        // Failures are surfaced as notices; the status stays idle.
        let _ = self.set_status(PresenceStatus::Idle).await;
        PresenceOutcome::Changed(PresenceStatus::Idle)
    }

    /// Activity resumed after an idle period.
    pub async fn on_active(&mut self) -> PresenceOutcome {
        if self.status == PresenceStatus::Offline {
            debug!(user_id = %self.user_id, "Activity while away, confirmation required");
            return PresenceOutcome::ConfirmationRequired;
        }
        let _ = self.set_status(PresenceStatus::Online).await;
        PresenceOutcome::Changed(PresenceStatus::Online)
    }

    /// Set the status and persist it.
    pub async fn set_status(&mut self, status: PresenceStatus) -> AppResult<()> {
        let previous = self.status;
        self.status = status;
        debug!(user_id = %self.user_id, from = %previous, to = %status, "Presence transition");
        self.persist().await
    }

    /// The availability toggle: on means online and accepting chats, off
    /// means offline and not accepting. One write covers both.
    pub async fn switch_availability(&mut self, online: bool) -> AppResult<()> {
        self.active = online;
        let status = if online {
            PresenceStatus::Online
        } else {
            PresenceStatus::Offline
        };
        self.set_status(status).await
    }

    /// The agent confirmed they are back.
    pub async fn confirm_online(&mut self) -> AppResult<()> {
        self.switch_availability(true).await
    }

    async fn persist(&self) -> AppResult<()> {
        let update = PresenceUpdate {
            active: self.active,
            id: self.user_id.clone(),
            status: self.status,
        };

        match self.backend.update_presence(&update).await {
            Ok(()) => {
                if update.status == PresenceStatus::Online {
                    info!(user_id = %self.user_id, "Agent online, requesting session extension");
                    self.events.publish(SessionEvent::ExtendRequested {
                        user_id: self.user_id.clone(),
                    });
                }
                Ok(())
            }
            Err(e) => {
                warn!(user_id = %self.user_id, status = %update.status, "Presence update failed: {}", e);
                self.notices
                    .push(Notice::from_error("Status update failed", &e));
                Err(e)
            }
        }
    }
}
