//! Presence: idle detection and the status lifecycle.

pub mod controller;
pub mod idle;
