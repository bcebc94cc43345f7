//! Singleton repeating timer.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// A timer that is either idle or running exactly one task.
///
/// Starting an already running slot does nothing. Dropping the slot cancels
/// the task.
#[derive(Debug, Default)]
pub enum TimerSlot {
    /// No timer.
    #[default]
    Idle,
    /// A timer task is ticking.
    Running(JoinHandle<()>),
}

impl TimerSlot {
    /// Create an idle slot.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Start ticking every `period`, first tick one period from now.
    ///
    /// `tick` returns `false` to stop the timer from inside. Returns whether
    /// a new timer was started.
    pub fn start<F>(&mut self, period: Duration, mut tick: F) -> bool
    where
        F: FnMut() -> bool + Send + 'static,
    {
        if self.is_running() {
            return false;
        }

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !tick() {
                    break;
                }
            }
        });
        *self = Self::Running(handle);
        true
    }

    /// Stop the timer. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_running();
        if let Self::Running(handle) = self {
            handle.abort();
        }
        *self = Self::Idle;
        was_running
    }

    /// Whether a timer task is still ticking.
    pub fn is_running(&self) -> bool {
        match self {
            Self::Running(handle) => !handle.is_finished(),
            Self::Idle => false,
        }
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        if let Self::Running(handle) = self {
            handle.abort();
        }
    }
}
