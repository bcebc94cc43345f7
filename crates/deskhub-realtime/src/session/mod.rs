//! Session lifecycle side effects.

pub mod extender;
