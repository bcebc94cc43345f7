//! Integration tests for idle detection, presence persistence, and session extension.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use deskhub_client::SessionToken;
use deskhub_core::events::SessionEvent;
use deskhub_entity::presence::PresenceStatus;
use deskhub_realtime::{IdleDetector, SessionExtender};

use helpers::{TestConsole, wait_for};

#[tokio::test(start_paused = true)]
async fn test_idle_timeout_then_activity_round_trip() {
    let console = TestConsole::new();
    console.backend.set_token(Some(SessionToken {
        value: "fresh-jwt".into(),
        expires_at: None,
    }));
    let mut session = console.events.subscribe();
    let extender = SessionExtender::new(
        console.backend.clone(),
        console.events.clone(),
        Arc::new(console.notices.clone()),
    )
    .spawn();

    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let detector = IdleDetector::spawn(Duration::from_millis(300_000), tx.clone());
    let task = tokio::spawn(header.run(rx));

    tokio::time::sleep(Duration::from_secs(200)).await;
    detector.record_activity();
    tokio::time::sleep(Duration::from_secs(200)).await;
    assert_eq!(snapshots.borrow().status, PresenceStatus::Online);

    let s = wait_for(&mut snapshots, |s| s.status == PresenceStatus::Idle).await;
    assert_eq!(s.status_color, "#FFB511");

    detector.record_activity();
    wait_for(&mut snapshots, |s| s.status == PresenceStatus::Online).await;

    let mut refreshed = None;
    while refreshed.is_none() {
        if let SessionEvent::TokenRefreshed { token, .. } = session.recv().await.unwrap() {
            refreshed = Some(token);
        }
    }
    assert_eq!(refreshed.as_deref(), Some("fresh-jwt"));

    let statuses: Vec<_> = console
        .backend
        .presence_updates()
        .iter()
        .map(|u| u.status)
        .collect();
    assert_eq!(statuses, vec![PresenceStatus::Idle, PresenceStatus::Online]);
    assert_eq!(console.backend.extend_calls(), 1);

    tx.send(deskhub_service::HeaderEvent::Shutdown).unwrap();
    task.await.unwrap();
    extender.abort();
}

#[tokio::test(start_paused = true)]
async fn test_idle_while_away_is_ignored() {
    let console = TestConsole::new();
    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let detector = IdleDetector::spawn(Duration::from_secs(60), tx.clone());
    let task = tokio::spawn(header.run(rx));

    tx.send(deskhub_service::HeaderEvent::AvailabilityToggled(false))
        .unwrap();
    wait_for(&mut snapshots, |s| s.status == PresenceStatus::Offline).await;

    tokio::time::sleep(Duration::from_secs(61)).await;
    detector.record_activity();
    let s = wait_for(&mut snapshots, |s| s.confirmation_open).await;
    assert_eq!(s.status, PresenceStatus::Offline);
    assert_eq!(console.backend.presence_updates().len(), 1);

    tx.send(deskhub_service::HeaderEvent::Shutdown).unwrap();
    task.await.unwrap();
}

#[tokio::test]
async fn test_presence_failure_surfaces_notice_without_rollback() {
    let console = TestConsole::new();
    console.backend.fail_presence(true);
    let mut notices = console.notices.subscribe();
    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let task = tokio::spawn(header.run(rx));

    assert_eq!(notices.recv().await.unwrap().title, "Loading status failed");
    wait_for(&mut snapshots, |s| s.status == PresenceStatus::Online).await;

    tx.send(deskhub_service::HeaderEvent::StatusChanged(PresenceStatus::Idle))
        .unwrap();
    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.title, "Status update failed");
    assert!(notice.message.contains("unavailable"));
    let s = wait_for(&mut snapshots, |s| s.status == PresenceStatus::Idle).await;
    assert_eq!(s.status, PresenceStatus::Idle);

    tx.send(deskhub_service::HeaderEvent::Shutdown).unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stored_away_status_survives_restart() {
    let console = TestConsole::new();
    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let task = tokio::spawn(header.run(rx));
    tx.send(deskhub_service::HeaderEvent::AvailabilityToggled(false))
        .unwrap();
    tx.send(deskhub_service::HeaderEvent::Shutdown).unwrap();
    assert_eq!(task.await.unwrap().status, PresenceStatus::Offline);

    let (header, rx) = console.header(&["ROLE_CUSTOMER_SUPPORT_AGENT"]);
    let tx = header.sender();
    let mut snapshots = header.subscribe();
    let task = tokio::spawn(header.run(rx));
    let s = wait_for(&mut snapshots, |s| s.status == PresenceStatus::Offline).await;
    assert!(!s.active);

    let detector = IdleDetector::spawn(Duration::from_secs(60), tx.clone());
    tokio::time::sleep(Duration::from_secs(61)).await;
    detector.record_activity();
    let s = wait_for(&mut snapshots, |s| s.confirmation_open).await;
    assert_eq!(s.status, PresenceStatus::Offline);

    tx.send(deskhub_service::HeaderEvent::Shutdown).unwrap();
    task.await.unwrap();
}
