//! Core traits defined in `deskhub-core` and implemented by other crates.

pub mod cache;
pub mod notice;

pub use cache::CacheProvider;
pub use notice::NoticeSink;
