//! Role-based filtering of the side-navigation tree.

use tracing::debug;

use deskhub_entity::menu::{MenuNode, MenuTree};
use deskhub_entity::user::RoleAuthority;

use super::policies::SettingsPolicies;

/// Derives the visible menu for a role.
///
/// Only top-level items are examined; the children of an admitted item
/// pass through untouched. The source tree is never modified.
#[derive(Debug, Clone, Default)]
pub struct RoleBasedMenuFilter {
    /// The policy configuration.
    policies: SettingsPolicies,
}

impl RoleBasedMenuFilter {
    /// Creates a filter with the default policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &SettingsPolicies {
        &self.policies
    }

    /// The items of `tree` visible to `role`.
    pub fn filter(&self, tree: &[MenuNode], role: &RoleAuthority) -> MenuTree {
        let rule = self.policies.menu_rule(role);
        let visible: MenuTree = tree
            .iter()
            .filter(|node| rule.admits(node.tag()))
            .cloned()
            .collect();
        debug!(
            role = %role,
            total = tree.len(),
            visible = visible.len(),
            "Filtered menu"
        );
        visible
    }

    /// Like [`filter`](Self::filter), with a missing or unrecognised role
    /// seeing nothing.
    pub fn filter_for(&self, tree: &[MenuNode], role: Option<&RoleAuthority>) -> MenuTree {
        match role {
            Some(role) => self.filter(tree, role),
            None => {
                debug!("No recognised role, hiding menu");
                Vec::new()
            }
        }
    }
}
