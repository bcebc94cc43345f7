//! Integration tests for the header actor.

mod helpers;

use std::time::Duration;

use deskhub_core::events::SessionEvent;
use deskhub_entity::presence::PresenceStatus;
use deskhub_realtime::ActivitySignal;
use deskhub_service::HeaderEvent;

use helpers::{TestConsole, wait_for};

#[tokio::test(start_paused = true)]
async fn test_away_countdown_expires_into_confirmation() {
    let console = TestConsole::new();
    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let task = tokio::spawn(header.run(rx));

    tx.send(HeaderEvent::AvailabilityToggled(false)).unwrap();
    let s = wait_for(&mut snapshots, |s| s.countdown_remaining == Some(300)).await;
    assert_eq!(s.status, PresenceStatus::Offline);
    assert!(!s.confirmation_open);

    let s = wait_for(&mut snapshots, |s| s.countdown_remaining == Some(1)).await;
    assert!(!s.confirmation_open);

    let s = wait_for(&mut snapshots, |s| s.confirmation_open).await;
    assert_eq!(s.countdown_remaining, None);

    tx.send(HeaderEvent::ConfirmOnline).unwrap();
    let s = wait_for(&mut snapshots, |s| s.status == PresenceStatus::Online).await;
    assert!(!s.confirmation_open);
    assert!(s.active);

    tx.send(HeaderEvent::Shutdown).unwrap();
    let last = task.await.unwrap();
    assert_eq!(last.status, PresenceStatus::Online);
}

#[tokio::test(start_paused = true)]
async fn test_switching_online_cancels_countdown() {
    let console = TestConsole::new();
    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let task = tokio::spawn(header.run(rx));

    tx.send(HeaderEvent::AvailabilityToggled(false)).unwrap();
    wait_for(&mut snapshots, |s| s.countdown_remaining == Some(200)).await;
    tx.send(HeaderEvent::AvailabilityToggled(true)).unwrap();
    let s = wait_for(&mut snapshots, |s| s.status == PresenceStatus::Online).await;
    assert_eq!(s.countdown_remaining, None);

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(!snapshots.borrow().confirmation_open);

    tx.send(HeaderEvent::Shutdown).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_offline_requires_confirmation_before_online() {
    let console = TestConsole::new();
    let (header, rx) = console.header(&["ROLE_SERVICE_MANAGER"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let task = tokio::spawn(header.run(rx));

    tx.send(HeaderEvent::AvailabilityToggled(false)).unwrap();
    tx.send(HeaderEvent::Activity(ActivitySignal::Idle)).unwrap();
    tx.send(HeaderEvent::Activity(ActivitySignal::Active)).unwrap();
    let s = wait_for(&mut snapshots, |s| s.confirmation_open).await;
    assert_eq!(s.status, PresenceStatus::Offline);

    tx.send(HeaderEvent::CancelConfirmation).unwrap();
    let s = wait_for(&mut snapshots, |s| !s.confirmation_open).await;
    assert_eq!(s.status, PresenceStatus::Offline);

    tx.send(HeaderEvent::Shutdown).unwrap();
    task.await.unwrap();

    let statuses: Vec<_> = console
        .backend
        .presence_updates()
        .iter()
        .map(|u| u.status)
        .collect();
    assert_eq!(statuses, vec![PresenceStatus::Offline]);
}

#[tokio::test]
async fn test_logout_stops_header_and_announces() {
    let console = TestConsole::new();
    let mut session = console.events.subscribe();
    let (header, rx) = console.header(&["ROLE_ADMINISTRATOR"]);
    let tx = header.sender();
    let task = tokio::spawn(header.run(rx));

    tx.send(HeaderEvent::Logout).unwrap();
    let last = task.await.unwrap();
    assert!(last.logged_out);
    assert_eq!(console.backend.logout_calls(), 1);

    loop {
        match session.recv().await.unwrap() {
            SessionEvent::LoggedOut { user_id } => {
                assert_eq!(user_id, console.user_id);
                break;
            }
            _ => continue,
        }
    }
}

#[tokio::test]
async fn test_logout_failure_keeps_running() {
    let console = TestConsole::new();
    console.backend.fail_session(true);
    let mut notices = console.notices.subscribe();
    let (header, rx) = console.header(&["ROLE_ADMINISTRATOR"]);
    let tx = header.sender();
    let task = tokio::spawn(header.run(rx));

    tx.send(HeaderEvent::Logout).unwrap();
    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.title, "Logout failed");
    assert!(!task.is_finished());

    tx.send(HeaderEvent::Shutdown).unwrap();
    assert!(!task.await.unwrap().logged_out);
}
