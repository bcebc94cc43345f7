//! The header actor.
//!
//! [`HeaderViewModel`] owns every piece of header state and every timer.
//! It processes [`HeaderEvent`]s one at a time from a single channel and
//! republishes a [`HeaderSnapshot`] after each one. Timers and background
//! saves report back by sending events into the same channel.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use deskhub_auth::RoleBasedMenuFilter;
use deskhub_client::backend::{PresenceBackend, SessionBackend};
use deskhub_core::config::AppConfig;
use deskhub_core::events::{EventBus, SessionEvent};
use deskhub_core::result::AppResult;
use deskhub_core::traits::NoticeSink;
use deskhub_core::types::Notice;
use deskhub_entity::menu::MenuTree;
use deskhub_entity::notification::{NotificationPreferences, PreferenceKey};
use deskhub_entity::presence::PresenceStatus;
use deskhub_entity::user::RoleAuthority;
use deskhub_realtime::notification::ChatCounts;
use deskhub_realtime::{
    ActivitySignal, AlertSink, IdlePresenceController, NotificationPoller, PresenceOutcome,
    TimerSlot,
};

use super::event::HeaderEvent;
use super::snapshot::HeaderSnapshot;
use crate::context::ViewerContext;
use crate::settings::UserProfileSettingsStore;

/// Timing knobs of the header.
#[derive(Debug, Clone)]
pub struct HeaderConfig {
    /// How often chat alerts repeat while a count stays above zero.
    pub repeat_interval: Duration,
    /// Length of the away countdown in ticks.
    pub countdown_seconds: u32,
    /// Length of one countdown tick.
    pub countdown_tick: Duration,
}

impl HeaderConfig {
    /// Derives header timing from the application config.
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            repeat_interval: config.notifications.repeat_interval(),
            countdown_seconds: config.presence.confirmation_countdown_seconds,
            countdown_tick: Duration::from_secs(1),
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self::from_app(&AppConfig::default())
    }
}

/// Collaborators the header is assembled from.
#[derive(Debug)]
pub struct HeaderParts {
    pub viewer: ViewerContext,
    pub config: HeaderConfig,
    pub presence: Arc<dyn PresenceBackend>,
    pub session: Arc<dyn SessionBackend>,
    pub settings: Arc<UserProfileSettingsStore>,
    pub alerts: Arc<dyn AlertSink>,
    /// The full menu tree before role filtering.
    pub menu: MenuTree,
    pub menu_filter: RoleBasedMenuFilter,
    pub events: EventBus,
    pub notices: Arc<dyn NoticeSink>,
}

/// Header state machine.
#[derive(Debug)]
pub struct HeaderViewModel {
    viewer: ViewerContext,
    config: HeaderConfig,
    presence: IdlePresenceController,
    poller: NotificationPoller,
    settings: Arc<UserProfileSettingsStore>,
    preferences: watch::Receiver<NotificationPreferences>,
    session: Arc<dyn SessionBackend>,
    menu: MenuTree,
    menu_filter: RoleBasedMenuFilter,
    visible_menu: MenuTree,
    events: EventBus,
    notices: Arc<dyn NoticeSink>,

    counts: ChatCounts,
    confirmation_open: bool,
    drawer_open: bool,
    countdown: TimerSlot,
    countdown_remaining: Option<u32>,
    /// Bumped on every countdown start so stale ticks are ignored.
    countdown_generation: u64,
    logged_out: bool,

    tx: mpsc::UnboundedSender<HeaderEvent>,
    snapshot: watch::Sender<HeaderSnapshot>,
}

impl HeaderViewModel {
    /// Assembles the header. Returns the actor and the receiving end of its
    /// event channel; feed the receiver to [`HeaderViewModel::run`].
    pub fn new(parts: HeaderParts) -> (Self, mpsc::UnboundedReceiver<HeaderEvent>) {
        let HeaderParts {
            viewer,
            config,
            presence,
            session,
            settings,
            alerts,
            menu,
            menu_filter,
            events,
            notices,
        } = parts;

        let (tx, rx) = mpsc::unbounded_channel();
        let preferences = settings.subscribe();
        let controller = IdlePresenceController::new(
            viewer.user_id.clone(),
            presence,
            events.clone(),
            notices.clone(),
        );
        let poller = NotificationPoller::new(
            viewer.user_id.clone(),
            config.repeat_interval,
            preferences.clone(),
            alerts,
        );
        let visible_menu = menu_filter.filter_for(&menu, viewer.role.as_ref());
        let (snapshot, _) = watch::channel(HeaderSnapshot::empty(viewer.user_id.clone()));

        let vm = Self {
            viewer,
            config,
            presence: controller,
            poller,
            settings,
            preferences,
            session,
            menu,
            menu_filter,
            visible_menu,
            events,
            notices,
            counts: ChatCounts::default(),
            confirmation_open: false,
            drawer_open: false,
            countdown: TimerSlot::new(),
            countdown_remaining: None,
            countdown_generation: 0,
            logged_out: false,
            tx,
            snapshot,
        };
        vm.publish();
        (vm, rx)
    }

    /// A sender for feeding events into the actor.
    pub fn sender(&self) -> mpsc::UnboundedSender<HeaderEvent> {
        self.tx.clone()
    }

    /// Subscribes to header snapshots.
    pub fn subscribe(&self) -> watch::Receiver<HeaderSnapshot> {
        self.snapshot.subscribe()
    }

    /// The current header state.
    pub fn snapshot(&self) -> HeaderSnapshot {
        let role = self.viewer.role;
        HeaderSnapshot {
            user_id: self.viewer.user_id.clone(),
            role,
            status: self.presence.status(),
            status_color: self.presence.status().color().hex().to_string(),
            active: self.presence.is_active(),
            counts: self.counts,
            confirmation_open: self.confirmation_open,
            countdown_remaining: self.countdown_remaining,
            drawer_open: self.drawer_open,
            menu: self.visible_menu.clone(),
            settings_sections: self
                .menu_filter
                .policies()
                .visible_sections(role.as_ref()),
            preferences: *self.preferences.borrow(),
            logged_out: self.logged_out,
        }
    }

    /// Processes events until shutdown or logout. Returns the final state.
    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<HeaderEvent>) -> HeaderSnapshot {
        info!(user_id = %self.viewer.user_id, role = ?self.viewer.role, "Header started");
        self.load_preferences();
        // Read failures are already surfaced as notices.
        let _ = self.presence.restore().await;
        self.publish();
        while let Some(event) = rx.recv().await {
            if self.handle(event).await.is_break() {
                break;
            }
        }
        self.teardown();
        info!(user_id = %self.viewer.user_id, "Header stopped");
        self.snapshot()
    }

    /// Processes a single event.
    pub async fn handle(&mut self, event: HeaderEvent) -> ControlFlow<()> {
        let flow = match event {
            HeaderEvent::Activity(ActivitySignal::Idle) => {
                self.presence.on_idle().await;
                ControlFlow::Continue(())
            }
            HeaderEvent::Activity(ActivitySignal::Active) => {
                if self.presence.on_active().await == PresenceOutcome::ConfirmationRequired {
                    self.confirmation_open = true;
                }
                ControlFlow::Continue(())
            }
            HeaderEvent::ChatsRefreshed(chats) => {
                self.counts = self.poller.refresh(&chats);
                ControlFlow::Continue(())
            }
            HeaderEvent::AvailabilityToggled(online) => {
                let status = if online {
                    PresenceStatus::Online
                } else {
                    PresenceStatus::Offline
                };
                self.on_status_change(status).await;
                ControlFlow::Continue(())
            }
            HeaderEvent::StatusChanged(status) => {
                self.on_status_change(status).await;
                ControlFlow::Continue(())
            }
            HeaderEvent::ConfirmOnline => {
                let _ = self.presence.confirm_online().await;
                self.confirmation_open = false;
                self.stop_countdown();
                ControlFlow::Continue(())
            }
            HeaderEvent::CancelConfirmation => {
                self.confirmation_open = false;
                ControlFlow::Continue(())
            }
            HeaderEvent::ReopenConfirmation => {
                self.confirmation_open = true;
                ControlFlow::Continue(())
            }
            HeaderEvent::CountdownTick(generation) => {
                self.on_countdown_tick(generation);
                ControlFlow::Continue(())
            }
            HeaderEvent::OpenDrawer => {
                self.drawer_open = true;
                self.load_preferences();
                ControlFlow::Continue(())
            }
            HeaderEvent::CloseDrawer => {
                self.drawer_open = false;
                ControlFlow::Continue(())
            }
            HeaderEvent::PreferenceChanged(key, value) => {
                // The outcome comes back as `PreferencesSettled`.
                drop(self.on_preference_change(key, value));
                ControlFlow::Continue(())
            }
            HeaderEvent::PreferencesSettled => ControlFlow::Continue(()),
            HeaderEvent::Logout => self.logout().await,
            HeaderEvent::Shutdown => ControlFlow::Break(()),
        };
        self.publish();
        flow
    }

    /// Applies an explicit status change.
    ///
    /// Going away starts the confirmation countdown; coming back cancels it.
    pub async fn on_status_change(&mut self, status: PresenceStatus) {
        match status {
            PresenceStatus::Online => {
                let _ = self.presence.switch_availability(true).await;
                self.confirmation_open = false;
                self.stop_countdown();
            }
            PresenceStatus::Offline => {
                let _ = self.presence.switch_availability(false).await;
                self.start_countdown();
            }
            PresenceStatus::Idle => {
                let _ = self.presence.set_status(PresenceStatus::Idle).await;
            }
        }
    }

    /// Saves one preference in the background.
    ///
    /// Toggles are independent requests; the header is told through
    /// [`HeaderEvent::PreferencesSettled`] when this one finishes.
    pub fn on_preference_change(
        &self,
        key: PreferenceKey,
        value: bool,
    ) -> JoinHandle<AppResult<NotificationPreferences>> {
        let store = self.settings.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = store.update(key, value).await;
            let _ = tx.send(HeaderEvent::PreferencesSettled);
            result
        })
    }

    /// The menu `role` would see.
    pub fn on_menu_filter_request(&self, role: Option<&RoleAuthority>) -> MenuTree {
        self.menu_filter.filter_for(&self.menu, role)
    }

    fn load_preferences(&self) {
        let store = self.settings.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // Failures already surfaced as notices by the store.
            let _ = store.load().await;
            let _ = tx.send(HeaderEvent::PreferencesSettled);
        });
    }

    fn start_countdown(&mut self) {
        if self.countdown.is_running() {
            debug!("Away countdown already running");
            return;
        }
        if self.config.countdown_seconds == 0 {
            self.confirmation_open = true;
            return;
        }

        self.countdown_generation += 1;
        let generation = self.countdown_generation;
        let tx = self.tx.clone();
        self.countdown_remaining = Some(self.config.countdown_seconds);
        self.countdown.start(self.config.countdown_tick, move || {
            tx.send(HeaderEvent::CountdownTick(generation)).is_ok()
        });
        debug!(seconds = self.config.countdown_seconds, "Away countdown started");
    }

    fn stop_countdown(&mut self) {
        self.countdown.cancel();
        self.countdown_remaining = None;
    }

    fn on_countdown_tick(&mut self, generation: u64) {
        if generation != self.countdown_generation {
            return;
        }
        let Some(remaining) = self.countdown_remaining else {
            return;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.stop_countdown();
            self.confirmation_open = true;
            info!(user_id = %self.viewer.user_id, "Away countdown expired, asking for confirmation");
        } else {
            self.countdown_remaining = Some(remaining);
        }
    }

    async fn logout(&mut self) -> ControlFlow<()> {
        match self.session.logout().await {
            Ok(()) => {
                info!(user_id = %self.viewer.user_id, "Logged out");
                self.logged_out = true;
                self.teardown();
                self.events.publish(SessionEvent::LoggedOut {
                    user_id: self.viewer.user_id.clone(),
                });
                ControlFlow::Break(())
            }
            Err(e) => {
                warn!(user_id = %self.viewer.user_id, "Logout failed: {}", e);
                self.notices.push(Notice::from_error("Logout failed", &e));
                ControlFlow::Continue(())
            }
        }
    }

    fn teardown(&mut self) {
        self.stop_countdown();
        self.poller.stop();
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.snapshot.send_replace(snapshot);
    }
}
