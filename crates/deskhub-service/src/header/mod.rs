//! The console header: presence badge, chat counters, status confirmation
//! modal, settings drawer, menu, and logout.

pub mod event;
pub mod snapshot;
pub mod view_model;

pub use event::HeaderEvent;
pub use snapshot::HeaderSnapshot;
pub use view_model::{HeaderConfig, HeaderParts, HeaderViewModel};
