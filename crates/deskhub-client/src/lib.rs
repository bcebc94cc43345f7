//! # deskhub-client
//!
//! The console core talks to its backends only through the traits in
//! [`backend`]. This crate also owns the wire payloads ([`dto`]), which are
//! narrowed into domain entities before anything else sees them, plus two
//! implementations of the traits:
//!
//! - [`http::HttpBackend`]: the REST adapter, built on `reqwest`
//! - [`memory::InMemoryBackend`]: a scriptable in-process backend

pub mod backend;
pub mod dto;
pub mod http;
pub mod memory;

pub use backend::{
    ChatSource, PreferencesBackend, PresenceActivity, PresenceBackend, PresenceUpdate, RoleSource,
    SessionBackend, SessionToken,
};
pub use http::HttpBackend;
pub use memory::InMemoryBackend;
