//! # deskhub-entity
//!
//! Domain entity models for the DeskHub console: roles, presence status,
//! chat summaries, notification preferences, and the navigation menu tree.
//! Every type here is a plain value; narrowing from wire payloads happens
//! in `deskhub-client`.

pub mod chat;
pub mod menu;
pub mod notification;
pub mod presence;
pub mod user;
