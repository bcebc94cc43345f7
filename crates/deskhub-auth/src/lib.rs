//! # deskhub-auth
//!
//! Role-based visibility rules for the console: which top-level menu
//! items a role sees, and which settings-drawer sections it may open.

pub mod rbac;

pub use rbac::menu_filter::RoleBasedMenuFilter;
pub use rbac::policies::{SettingsPolicies, SettingsSection};
