//! Sink for user-visible notices.

use crate::types::notice::Notice;

/// Receives notices raised by the console core.
///
/// The presentation layer decides how to render them; the core only
/// guarantees every backend failure ends up here.
pub trait NoticeSink: Send + Sync + std::fmt::Debug + 'static {
    /// Publish a notice.
    fn push(&self, notice: Notice);
}
