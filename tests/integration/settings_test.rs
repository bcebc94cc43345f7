//! Integration tests for the user profile settings store.

mod helpers;

use deskhub_cache::keys;
use deskhub_core::error::ErrorKind;
use deskhub_core::traits::CacheProvider;
use deskhub_entity::notification::{NotificationPreferences, PreferenceKey};
use deskhub_service::HeaderEvent;

use helpers::{TestConsole, wait_for};

#[tokio::test]
async fn test_persist_failure_invalidates_cache_and_notifies() {
    let console = TestConsole::new();
    let stored =
        NotificationPreferences::default().with(PreferenceKey::NewChatPopupNotifications, true);
    console.backend.set_preferences(Some(stored));
    let mut notices = console.notices.subscribe();

    assert_eq!(console.settings.load().await.unwrap(), stored);
    let key = keys::preferences(&console.user_id);
    assert!(console.cache.exists(&key).await.unwrap());

    console.backend.fail_preferences(true);
    let err = console
        .settings
        .update(PreferenceKey::NewChatSoundNotifications, false)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);

    assert_eq!(console.settings.current(), stored);
    assert!(!console.cache.exists(&key).await.unwrap());
    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.message, err.message);
}

#[tokio::test]
async fn test_empty_backend_keeps_defaults() {
    let console = TestConsole::new();
    let prefs = console.settings.load().await.unwrap();
    assert_eq!(prefs, NotificationPreferences::default());
    assert!(prefs.use_autocorrect);
    assert!(prefs.new_chat_sound_notifications);
    assert!(prefs.forwarded_chat_sound_notifications);
    assert!(!prefs.new_chat_popup_notifications);
}

#[tokio::test]
async fn test_header_toggle_round_trip() {
    let console = TestConsole::new();
    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let task = tokio::spawn(header.run(rx));

    tx.send(HeaderEvent::OpenDrawer).unwrap();
    wait_for(&mut snapshots, |s| s.drawer_open).await;

    tx.send(HeaderEvent::PreferenceChanged(
        PreferenceKey::ForwardedChatSoundNotifications,
        false,
    ))
    .unwrap();
    tx.send(HeaderEvent::PreferenceChanged(
        PreferenceKey::NewChatPopupNotifications,
        true,
    ))
    .unwrap();

    let s = wait_for(&mut snapshots, |s| {
        !s.preferences.forwarded_chat_sound_notifications
            && s.preferences.new_chat_popup_notifications
    })
    .await;
    assert!(s.preferences.use_autocorrect);
    assert_eq!(
        console.backend.saved_preferences().last().copied(),
        Some(s.preferences)
    );

    tx.send(HeaderEvent::Shutdown).unwrap();
    task.await.unwrap();
}
