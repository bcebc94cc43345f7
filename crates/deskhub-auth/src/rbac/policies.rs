//! Role-to-visibility mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use deskhub_entity::menu::MenuTag;
use deskhub_entity::user::RoleAuthority;

/// A section of the user-settings drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsSection {
    /// Toggles for new (unanswered) chat alerts.
    NewChatNotifications,
    /// Toggles for forwarded chat alerts.
    ForwardedChatNotifications,
    /// Composer autocorrect toggle.
    Autocorrect,
}

/// How a role's menu is derived from the full tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRule {
    /// Every top-level item.
    All,
    /// Every top-level item except those with one of these tags.
    Exclude(HashSet<MenuTag>),
    /// Only top-level items with one of these tags.
    Only(HashSet<MenuTag>),
    /// Nothing at all.
    Nothing,
}

impl MenuRule {
    /// Whether a top-level item with `tag` passes this rule.
    pub fn admits(&self, tag: Option<MenuTag>) -> bool {
        match self {
            Self::All => true,
            Self::Exclude(excluded) => tag.is_none_or(|t| !excluded.contains(&t)),
            Self::Only(allowed) => tag.is_some_and(|t| allowed.contains(&t)),
            Self::Nothing => false,
        }
    }
}

/// Visibility policy per role: menu rule plus visible settings sections.
#[derive(Debug, Clone)]
pub struct SettingsPolicies {
    /// Role → menu rule.
    menu: HashMap<RoleAuthority, MenuRule>,
    /// Role → visible settings sections.
    sections: HashMap<RoleAuthority, HashSet<SettingsSection>>,
}

impl SettingsPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut menu = HashMap::new();
        menu.insert(RoleAuthority::Administrator, MenuRule::All);
        menu.insert(
            RoleAuthority::ServiceManager,
            MenuRule::Exclude(HashSet::from([MenuTag::Settings, MenuTag::Training])),
        );
        menu.insert(
            RoleAuthority::CustomerSupportAgent,
            MenuRule::Exclude(HashSet::from([MenuTag::Settings, MenuTag::Analytics])),
        );
        menu.insert(
            RoleAuthority::ChatbotTrainer,
            MenuRule::Exclude(HashSet::from([MenuTag::Settings, MenuTag::Conversations])),
        );
        menu.insert(
            RoleAuthority::Analyst,
            MenuRule::Only(HashSet::from([MenuTag::Analytics])),
        );
        menu.insert(RoleAuthority::Unauthenticated, MenuRule::Nothing);

        let mut sections = HashMap::new();
        for role in RoleAuthority::ALL {
            let mut visible = HashSet::new();
            if role.handles_chats() {
                visible.insert(SettingsSection::NewChatNotifications);
                visible.insert(SettingsSection::ForwardedChatNotifications);
            }
            if role.is_authenticated() {
                visible.insert(SettingsSection::Autocorrect);
            }
            sections.insert(role, visible);
        }

        Self { menu, sections }
    }

    /// The menu rule for a role; unmapped roles see nothing.
    pub fn menu_rule(&self, role: &RoleAuthority) -> &MenuRule {
        self.menu.get(role).unwrap_or(&MenuRule::Nothing)
    }

    /// Whether `role` may see `section`.
    pub fn can_see(&self, role: &RoleAuthority, section: SettingsSection) -> bool {
        self.sections
            .get(role)
            .is_some_and(|visible| visible.contains(&section))
    }

    /// Visible sections for a role, in display order.
    pub fn visible_sections(&self, role: Option<&RoleAuthority>) -> Vec<SettingsSection> {
        let Some(visible) = role.and_then(|r| self.sections.get(r)) else {
            return Vec::new();
        };
        let mut out: Vec<_> = visible.iter().copied().collect();
        out.sort();
        out
    }
}

impl Default for SettingsPolicies {
    fn default() -> Self {
        Self::new()
    }
}
