//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use deskhub_auth::RoleBasedMenuFilter;
use deskhub_cache::MemoryCacheProvider;
use deskhub_client::InMemoryBackend;
use deskhub_core::config::CacheConfig;
use deskhub_core::events::EventBus;
use deskhub_core::types::{ChatId, UserId};
use deskhub_entity::chat::{ChatStatus, ChatSummary};
use deskhub_entity::menu::default_menu;
use deskhub_entity::notification::ChatSignal;
use deskhub_realtime::AlertSink;
use deskhub_service::header::HeaderConfig;
use deskhub_service::{
    HeaderEvent, HeaderParts, HeaderSnapshot, HeaderViewModel, NoticeBoard,
    UserProfileSettingsStore, ViewerContext,
};

/// The viewer every test signs in as.
pub const VIEWER: &str = "EE38001085718";

/// An alert as the presentation layer would have rendered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Sound(ChatSignal),
    Popup(ChatSignal, usize),
}

/// Alert sink that remembers everything it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingAlerts(Mutex<Vec<Alert>>);

impl RecordingAlerts {
    /// Drain the recorded alerts.
    pub fn take(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl AlertSink for RecordingAlerts {
    fn play_sound(&self, signal: ChatSignal) {
        self.0.lock().unwrap().push(Alert::Sound(signal));
    }

    fn show_popup(&self, signal: ChatSignal, count: usize) {
        self.0.lock().unwrap().push(Alert::Popup(signal, count));
    }
}

/// Test console context: in-memory backend plus every shared collaborator.
pub struct TestConsole {
    pub user_id: UserId,
    pub backend: Arc<InMemoryBackend>,
    pub cache: Arc<MemoryCacheProvider>,
    pub notices: NoticeBoard,
    pub events: EventBus,
    pub alerts: Arc<RecordingAlerts>,
    pub settings: Arc<UserProfileSettingsStore>,
}

impl TestConsole {
    /// Create a fresh console context
    pub fn new() -> Self {
        let user_id = UserId::new(VIEWER).unwrap();
        let backend = Arc::new(InMemoryBackend::new());
        let cache = Arc::new(MemoryCacheProvider::new(&CacheConfig::default()));
        let notices = NoticeBoard::default();
        let settings = Arc::new(UserProfileSettingsStore::new(
            user_id.clone(),
            backend.clone(),
            cache.clone(),
            Arc::new(notices.clone()),
        ));
        Self {
            user_id,
            backend,
            cache,
            notices,
            events: EventBus::default(),
            alerts: Arc::new(RecordingAlerts::default()),
            settings,
        }
    }

    /// Build a header for a viewer holding `authorities`
    pub fn header(&self, authorities: &[&str]) -> (HeaderViewModel, mpsc::UnboundedReceiver<HeaderEvent>) {
        HeaderViewModel::new(HeaderParts {
            viewer: ViewerContext::new(
                self.user_id.clone(),
                authorities.iter().map(|a| a.to_string()).collect(),
            ),
            config: HeaderConfig::default(),
            presence: self.backend.clone(),
            session: self.backend.clone(),
            settings: self.settings.clone(),
            alerts: self.alerts.clone(),
            menu: default_menu(),
            menu_filter: RoleBasedMenuFilter::new(),
            events: self.events.clone(),
            notices: Arc::new(self.notices.clone()),
        })
    }
}

/// A chat with the given status and assigned agent
pub fn chat(status: ChatStatus, agent: Option<&str>) -> ChatSummary {
    ChatSummary {
        id: ChatId::new(),
        status,
        customer_support_id: UserId::from_optional(agent),
        created: None,
    }
}

/// `n` chats nobody has picked up
pub fn unanswered(n: usize) -> Vec<ChatSummary> {
    (0..n).map(|_| chat(ChatStatus::Open, None)).collect()
}

/// Wait until the header publishes a snapshot matching `pred`
pub async fn wait_for(
    rx: &mut watch::Receiver<HeaderSnapshot>,
    pred: impl FnMut(&HeaderSnapshot) -> bool,
) -> HeaderSnapshot {
    tokio::time::timeout(Duration::from_secs(3600), rx.wait_for(pred))
        .await
        .expect("timed out waiting for header state")
        .expect("header stopped")
        .clone()
}
