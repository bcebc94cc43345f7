//! # deskhub-realtime
//!
//! The live parts of the console header:
//!
//! - Idle detection from user activity and the presence status lifecycle
//! - Chat notification polling with repeating sound/popup alerts
//! - Session extension driven by session events
//! - [`TimerSlot`], the singleton timer every repeating task runs on

pub mod notification;
pub mod presence;
pub mod session;
pub mod timer;

pub use notification::poller::{AlertSink, NotificationPoller};
pub use presence::controller::{IdlePresenceController, PresenceOutcome};
pub use presence::idle::{ActivityHandle, ActivitySignal, IdleDetector};
pub use session::extender::SessionExtender;
pub use timer::TimerSlot;
