//! Integration tests for chat counting and alert repetition.

mod helpers;

use std::time::Duration;

use deskhub_entity::chat::ChatStatus;
use deskhub_entity::notification::{ChatSignal, NotificationPreferences, PreferenceKey};
use deskhub_realtime::notification::poll::run_chat_poll;
use deskhub_service::HeaderEvent;

use helpers::{Alert, TestConsole, VIEWER, chat, unanswered, wait_for};

#[tokio::test(start_paused = true)]
async fn test_sound_on_popup_off_zero_to_three() {
    let console = TestConsole::new();
    console.backend.set_preferences(Some(
        NotificationPreferences::default()
            .with(PreferenceKey::NewChatSoundNotifications, true)
            .with(PreferenceKey::NewChatPopupNotifications, false),
    ));
    console.settings.load().await.unwrap();

    let (mut header, _rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let _ = header.handle(HeaderEvent::ChatsRefreshed(unanswered(3))).await;

    assert_eq!(header.snapshot().counts.unanswered, 3);
    assert_eq!(console.alerts.take(), vec![Alert::Sound(ChatSignal::NewChat)]);

    tokio::time::sleep(Duration::from_millis(120_001)).await;
    assert_eq!(console.alerts.take(), vec![Alert::Sound(ChatSignal::NewChat)]);

    let _ = header.handle(HeaderEvent::ChatsRefreshed(unanswered(2))).await;
    assert!(console.alerts.take().is_empty());

    let _ = header.handle(HeaderEvent::ChatsRefreshed(Vec::new())).await;
    tokio::time::sleep(Duration::from_millis(600_000)).await;
    assert!(console.alerts.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_forwarded_popup_requires_email() {
    let console = TestConsole::new();
    console.backend.set_preferences(Some(
        NotificationPreferences::default()
            .with(PreferenceKey::ForwardedChatSoundNotifications, false)
            .with(PreferenceKey::ForwardedChatPopupNotifications, true)
            .with(PreferenceKey::ForwardedChatEmailNotifications, true),
    ));
    console.settings.load().await.unwrap();

    let (mut header, _rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let chats = vec![
        chat(ChatStatus::Redirected, Some(VIEWER)),
        chat(ChatStatus::Redirected, Some("EE00000000000")),
        chat(ChatStatus::Open, Some(VIEWER)),
    ];
    let _ = header.handle(HeaderEvent::ChatsRefreshed(chats)).await;

    let counts = header.snapshot().counts;
    assert_eq!(counts.forwarded, 1);
    assert_eq!(counts.unanswered, 0);
    assert_eq!(
        console.alerts.take(),
        vec![Alert::Popup(ChatSignal::ForwardedChat, 1)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_default_preferences_play_sound_cues() {
    let console = TestConsole::new();
    console.settings.load().await.unwrap();

    let (mut header, _rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let mut chats = unanswered(1);
    chats.push(chat(ChatStatus::Redirected, Some(VIEWER)));
    let _ = header.handle(HeaderEvent::ChatsRefreshed(chats)).await;

    let mut alerts = console.alerts.take();
    alerts.sort_by_key(|a| format!("{a:?}"));
    assert_eq!(
        alerts,
        vec![
            Alert::Sound(ChatSignal::ForwardedChat),
            Alert::Sound(ChatSignal::NewChat),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_poll_loop_feeds_header() {
    let console = TestConsole::new();
    console.backend.set_chats(unanswered(2));

    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let task = tokio::spawn(header.run(rx));
    let poll = tokio::spawn(run_chat_poll(
        console.backend.clone(),
        Duration::from_secs(5),
        tx.clone(),
    ));

    wait_for(&mut snapshots, |s| s.counts.unanswered == 2).await;
    console.backend.set_chats(Vec::new());
    wait_for(&mut snapshots, |s| s.counts.unanswered == 0).await;

    poll.abort();
    tx.send(HeaderEvent::Shutdown).unwrap();
    task.await.unwrap();
}
