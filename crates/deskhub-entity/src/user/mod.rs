//! User domain entities.

pub mod role;

pub use role::RoleAuthority;
