//! DeskHub Console: the customer-support header, headless.
//!
//! Wires every crate together against the REST backend and drives the
//! header from stdin. Each line counts as user activity; a few words are
//! commands.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt};

use deskhub_auth::RoleBasedMenuFilter;
use deskhub_cache::MemoryCacheProvider;
use deskhub_client::HttpBackend;
use deskhub_core::config::AppConfig;
use deskhub_core::error::AppError;
use deskhub_core::events::EventBus;
use deskhub_core::traits::CacheProvider;
use deskhub_core::types::UserId;
use deskhub_entity::menu::{MenuTree, default_menu, parse_menu};
use deskhub_entity::notification::{ChatSignal, NotificationPreferences, PreferenceKey};
use deskhub_realtime::notification::poll::run_chat_poll;
use deskhub_realtime::{ActivityHandle, AlertSink, IdleDetector, SessionExtender};
use deskhub_service::{
    HeaderEvent, HeaderParts, HeaderSnapshot, HeaderViewModel, NoticeBoard,
    UserProfileSettingsStore, ViewerContext,
};
use deskhub_service::header::HeaderConfig;

fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(run(config));
    // A pending stdin read holds a blocking thread until the next newline.
    runtime.shutdown_timeout(Duration::from_millis(100));

    if let Err(e) = result {
        tracing::error!("Console error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DESKHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Alerts rendered as log lines.
#[derive(Debug)]
struct LogAlerts;

impl AlertSink for LogAlerts {
    fn play_sound(&self, signal: ChatSignal) {
        tracing::info!(%signal, "Sound cue");
    }

    fn show_popup(&self, signal: ChatSignal, count: usize) {
        tracing::info!(%signal, count, "Popup");
    }
}

/// Main console run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DeskHub console v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Backend, cache, notices, events ──────────────────
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    let cache: Arc<dyn CacheProvider> = Arc::new(MemoryCacheProvider::new(&config.cache));
    let notices = NoticeBoard::default();
    let events = EventBus::default();
    tracing::info!("Backend at {}", config.backend.base_url);

    // ── Step 2: Resolve the viewer ───────────────────────────────
    let user_id = UserId::new(config.session.user_id.clone())
        .map_err(|_| AppError::configuration("session.user_id must be set"))?;
    let viewer = ViewerContext::resolve(user_id.clone(), backend.as_ref(), cache.as_ref()).await?;
    tracing::info!(role = ?viewer.role, "Viewer resolved");

    // ── Step 3: Menu ─────────────────────────────────────────────
    let menu = load_menu(config.menu.path.as_deref()).await?;
    let menu_filter = RoleBasedMenuFilter::new();
    let visible = menu_filter.filter_for(&menu, viewer.role.as_ref());
    println!("{}", serde_json::to_string_pretty(&visible)?);

    // ── Step 4: Settings store and header ────────────────────────
    let settings = Arc::new(UserProfileSettingsStore::new(
        user_id,
        backend.clone(),
        cache.clone(),
        Arc::new(notices.clone()),
    ));
    let (header, header_rx) = HeaderViewModel::new(HeaderParts {
        viewer,
        config: HeaderConfig::from_app(&config),
        presence: backend.clone(),
        session: backend.clone(),
        settings: settings.clone(),
        alerts: Arc::new(LogAlerts),
        menu,
        menu_filter,
        events: events.clone(),
        notices: Arc::new(notices.clone()),
    });
    let header_tx = header.sender();
    let snapshots = header.subscribe();

    // ── Step 5: Background tasks ─────────────────────────────────
    let extender =
        SessionExtender::new(backend.clone(), events.clone(), Arc::new(notices.clone())).spawn();
    let detector = IdleDetector::spawn(config.presence.idle_timeout(), header_tx.clone());
    let poll = tokio::spawn(run_chat_poll(
        backend.clone(),
        config.notifications.chat_poll_interval(),
        header_tx.clone(),
    ));
    let printer = tokio::spawn(print_snapshots(snapshots));
    let input = tokio::spawn(read_commands(
        header_tx.clone(),
        detector.handle(),
        settings,
    ));

    // ── Step 6: Run until quit, logout, or Ctrl+C ────────────────
    let mut header_task = tokio::spawn(header.run(header_rx));
    let finished = tokio::select! {
        res = &mut header_task => Some(res),
        _ = tokio::signal::ctrl_c() => None,
    };
    let joined = match finished {
        Some(res) => res,
        None => {
            tracing::info!("Interrupt received, shutting down...");
            let _ = header_tx.send(HeaderEvent::Shutdown);
            header_task.await
        }
    };
    let final_state =
        joined.map_err(|e| AppError::internal(format!("Header task failed: {}", e)))?;

    input.abort();
    poll.abort();
    extender.abort();
    printer.abort();
    drop(detector);

    tracing::info!(
        logged_out = final_state.logged_out,
        "DeskHub console shut down"
    );
    Ok(())
}

/// Load the menu tree from `path`, or the bundled tree
async fn load_menu(path: Option<&str>) -> Result<MenuTree, AppError> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::configuration(format!("Failed to read menu '{}': {}", path, e))
            })?;
            parse_menu(&json)
        }
        None => Ok(default_menu()),
    }
}

/// Print a status line whenever the header changes
async fn print_snapshots(mut rx: tokio::sync::watch::Receiver<HeaderSnapshot>) {
    while rx.changed().await.is_ok() {
        let s = rx.borrow_and_update().clone();
        let countdown = s
            .countdown_remaining
            .map(|n| format!("{}s", n))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "status={} ({}) active={} unanswered={} forwarded={} confirm={} countdown={} drawer={}",
            s.status,
            s.status_color,
            s.active,
            s.counts.unanswered,
            s.counts.forwarded,
            s.confirmation_open,
            countdown,
            s.drawer_open,
        );
    }
}

/// Feed stdin into the header
async fn read_commands(
    header: mpsc::UnboundedSender<HeaderEvent>,
    activity: ActivityHandle,
    settings: Arc<UserProfileSettingsStore>,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                let _ = header.send(HeaderEvent::Shutdown);
                break;
            }
            Err(e) => {
                tracing::warn!("Failed to read stdin: {}", e);
                break;
            }
        };

        activity.record();
        match parse_command(&line, &settings.current()) {
            Ok(Some(event)) => {
                if header.send(event).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("{}", e.message),
        }
    }
}

/// Map an input line to a header event; anything unrecognised is activity only
fn parse_command(
    line: &str,
    preferences: &NotificationPreferences,
) -> Result<Option<HeaderEvent>, AppError> {
    let mut words = line.split_whitespace();
    let event = match words.next() {
        Some("away") => HeaderEvent::AvailabilityToggled(false),
        Some("online") => HeaderEvent::AvailabilityToggled(true),
        Some("confirm") => HeaderEvent::ConfirmOnline,
        Some("cancel") => HeaderEvent::CancelConfirmation,
        Some("reopen") => HeaderEvent::ReopenConfirmation,
        Some("settings") => HeaderEvent::OpenDrawer,
        Some("close") => HeaderEvent::CloseDrawer,
        Some("toggle") => {
            let key: PreferenceKey = words
                .next()
                .ok_or_else(|| AppError::validation("Usage: toggle <preference>"))?
                .parse()?;
            HeaderEvent::PreferenceChanged(key, !preferences.get(key))
        }
        Some("logout") => HeaderEvent::Logout,
        Some("quit") => HeaderEvent::Shutdown,
        _ => return Ok(None),
    };
    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let prefs = NotificationPreferences::default();
        assert_eq!(
            parse_command("away", &prefs).unwrap(),
            Some(HeaderEvent::AvailabilityToggled(false))
        );
        assert_eq!(
            parse_command("toggle useAutocorrect", &prefs).unwrap(),
            Some(HeaderEvent::PreferenceChanged(PreferenceKey::UseAutocorrect, false))
        );
        assert_eq!(parse_command("hello there", &prefs).unwrap(), None);
        assert_eq!(parse_command("", &prefs).unwrap(), None);
        assert!(parse_command("toggle", &prefs).is_err());
        assert!(parse_command("toggle nonsense", &prefs).is_err());
    }
}
