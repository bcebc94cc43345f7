//! Chat alerts driven by chat list refreshes.
//!
//! Each signal (new chats, forwarded chats) keeps the count from the last
//! refresh. A 0 → >0 transition alerts immediately and starts a repeat
//! timer that alerts again on every tick while the count stays above zero.
//! Returning to zero cancels the timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use deskhub_core::types::UserId;
use deskhub_entity::chat::ChatSummary;
use deskhub_entity::notification::{ChatSignal, NotificationPreferences};

use super::counts::{ChatCounts, count_chats};
use crate::timer::TimerSlot;

/// Presentation hooks for chat alerts.
pub trait AlertSink: Send + Sync + std::fmt::Debug + 'static {
    /// Play the sound cue for `signal`.
    fn play_sound(&self, signal: ChatSignal);

    /// Show a transient popup for `signal`.
    fn show_popup(&self, signal: ChatSignal, count: usize);
}

#[derive(Debug)]
struct SignalTracker {
    signal: ChatSignal,
    previous: usize,
    current: Arc<AtomicUsize>,
    timer: TimerSlot,
}

impl SignalTracker {
    fn new(signal: ChatSignal) -> Self {
        Self {
            signal,
            previous: 0,
            current: Arc::new(AtomicUsize::new(0)),
            timer: TimerSlot::new(),
        }
    }
}

/// Per-viewer chat alert state.
#[derive(Debug)]
pub struct NotificationPoller {
    viewer: UserId,
    repeat_interval: Duration,
    preferences: watch::Receiver<NotificationPreferences>,
    alerts: Arc<dyn AlertSink>,
    new_chats: SignalTracker,
    forwarded_chats: SignalTracker,
}

impl NotificationPoller {
    /// Create a poller reading the newest preferences from `preferences`.
    pub fn new(
        viewer: UserId,
        repeat_interval: Duration,
        preferences: watch::Receiver<NotificationPreferences>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            viewer,
            repeat_interval,
            preferences,
            alerts,
            new_chats: SignalTracker::new(ChatSignal::NewChat),
            forwarded_chats: SignalTracker::new(ChatSignal::ForwardedChat),
        }
    }

    /// Feed the latest chat list. Returns the fresh counts.
    pub fn refresh(&mut self, chats: &[ChatSummary]) -> ChatCounts {
        let counts = count_chats(chats, &self.viewer);
        for tracker in [&mut self.new_chats, &mut self.forwarded_chats] {
            let count = counts.get(tracker.signal);
            Self::apply(
                tracker,
                count,
                self.repeat_interval,
                &self.preferences,
                &self.alerts,
            );
        }
        counts
    }

    /// Whether the repeat timer for `signal` is running.
    pub fn is_repeating(&self, signal: ChatSignal) -> bool {
        match signal {
            ChatSignal::NewChat => self.new_chats.timer.is_running(),
            ChatSignal::ForwardedChat => self.forwarded_chats.timer.is_running(),
        }
    }

    /// Cancel every repeat timer.
    pub fn stop(&mut self) {
        self.new_chats.timer.cancel();
        self.forwarded_chats.timer.cancel();
    }

    fn apply(
        tracker: &mut SignalTracker,
        count: usize,
        period: Duration,
        preferences: &watch::Receiver<NotificationPreferences>,
        alerts: &Arc<dyn AlertSink>,
    ) {
        tracker.current.store(count, Ordering::SeqCst);
        let previous = std::mem::replace(&mut tracker.previous, count);
        let signal = tracker.signal;

        if count == 0 {
            if tracker.timer.cancel() {
                debug!(?signal, "Chat count back to zero, alerts stopped");
            }
            return;
        }
        if previous > 0 {
            return;
        }

        debug!(?signal, count, "Chat count rose from zero");
        alert(alerts.as_ref(), &preferences.borrow(), signal, count);

        let alerts = alerts.clone();
        let preferences = preferences.clone();
        let current = tracker.current.clone();
        tracker.timer.start(period, move || {
            let count = current.load(Ordering::SeqCst);
            if count == 0 {
                return false;
            }
            alert(alerts.as_ref(), &preferences.borrow(), signal, count);
            true
        });
    }
}

/// Fire the alerts `preferences` allow for `signal`.
fn alert(
    alerts: &dyn AlertSink,
    preferences: &NotificationPreferences,
    signal: ChatSignal,
    count: usize,
) {
    let prefs = preferences.for_signal(signal);
    if prefs.sound {
        alerts.play_sound(signal);
    }
    if prefs.shows_popup() {
        alerts.show_popup(signal, count);
    }
}
