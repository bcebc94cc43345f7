//! Role-based access control for navigation and settings.

pub mod menu_filter;
pub mod policies;
