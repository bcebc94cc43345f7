//! # deskhub-core
//!
//! Core crate for the DeskHub console. Contains configuration schemas,
//! typed identifiers, user-visible notices, session events, the cache
//! and notice traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DeskHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
