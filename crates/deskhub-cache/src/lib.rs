//! # deskhub-cache
//!
//! Query cache for DeskHub. Backend reads (the user's preference record,
//! mostly) are cached here so the settings drawer can reopen without a
//! round trip, and invalidated when a write fails.

pub mod keys;
pub mod memory;

pub use memory::MemoryCacheProvider;
