//! Inactivity detection.
//!
//! One task owns the deadline. Activity pushes it back; crossing it emits a
//! single [`ActivitySignal::Idle`], and the first activity afterwards emits a
//! single [`ActivitySignal::Active`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

/// Edge emitted by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySignal {
    /// No activity for the whole timeout.
    Idle,
    /// Activity resumed after an idle period.
    Active,
}

/// Cheap handle for reporting user activity.
#[derive(Debug, Clone)]
pub struct ActivityHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl ActivityHandle {
    /// Report activity. Returns `false` once the detector has stopped.
    pub fn record(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Running idle detector. Dropping it stops the task.
#[derive(Debug)]
pub struct IdleDetector {
    handle: ActivityHandle,
    task: JoinHandle<()>,
}

impl IdleDetector {
    /// Spawn a detector that delivers signals into `out`.
    ///
    /// The task ends when `out` is closed.
    pub fn spawn<T>(timeout: Duration, out: mpsc::UnboundedSender<T>) -> Self
    where
        T: From<ActivitySignal> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(timeout, rx, out));
        Self {
            handle: ActivityHandle { tx },
            task,
        }
    }

    /// Report activity.
    pub fn record_activity(&self) -> bool {
        self.handle.record()
    }

    /// A handle that can be moved into input readers.
    pub fn handle(&self) -> ActivityHandle {
        self.handle.clone()
    }
}

impl Drop for IdleDetector {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(
    timeout: Duration,
    mut activity: mpsc::UnboundedReceiver<()>,
    out: mpsc::UnboundedSender<T>,
) where
    T: From<ActivitySignal> + Send + 'static,
{
    let mut idle = false;
    let mut deadline = Instant::now() + timeout;

    loop {
        tokio::select! {
            msg = activity.recv() => {
                if msg.is_none() {
                    break;
                }
                deadline = Instant::now() + timeout;
                if idle {
                    idle = false;
                    debug!("Activity resumed");
                    if out.send(ActivitySignal::Active.into()).is_err() {
                        break;
                    }
                }
            }
            _ = time::sleep_until(deadline), if !idle => {
                idle = true;
                debug!(?timeout, "User went idle");
                if out.send(ActivitySignal::Idle.into()).is_err() {
                    break;
                }
            }
        }
    }

    debug!("Idle detector stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_idle_then_active_once() {
        let (tx, mut rx) = mpsc::unbounded_channel::<ActivitySignal>();
        let detector = IdleDetector::spawn(Duration::from_secs(300), tx);

        time::sleep(Duration::from_secs(299)).await;
        detector.record_activity();
        time::sleep(Duration::from_secs(200)).await;
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_secs(101)).await;
        assert_eq!(rx.recv().await, Some(ActivitySignal::Idle));

        // Staying idle does not repeat the signal.
        time::sleep(Duration::from_secs(1000)).await;
        assert!(rx.try_recv().is_err());

        detector.record_activity();
        detector.record_activity();
        assert_eq!(rx.recv().await, Some(ActivitySignal::Active));
        time::sleep(Duration::from_millis(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_goes_idle_again_after_activity() {
        let (tx, mut rx) = mpsc::unbounded_channel::<ActivitySignal>();
        let detector = IdleDetector::spawn(Duration::from_secs(10), tx);

        assert_eq!(rx.recv().await, Some(ActivitySignal::Idle));
        assert!(detector.handle().record());
        assert_eq!(rx.recv().await, Some(ActivitySignal::Active));
        assert_eq!(rx.recv().await, Some(ActivitySignal::Idle));
    }
}
