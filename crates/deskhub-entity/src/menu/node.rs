//! Menu tree nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use deskhub_core::error::AppError;

/// A single item of the side navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Stable identifier; top-level items use it as their tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Label per language code (`"et"`, `"en"`, ...).
    pub label: BTreeMap<String, String>,
    /// Route, absent for pure group items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Child items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Create a node with an id and an English label.
    pub fn new(id: impl Into<String>, label_en: impl Into<String>) -> Self {
        let mut label = BTreeMap::new();
        label.insert("en".to_string(), label_en.into());
        Self {
            id: Some(id.into()),
            label,
            path: None,
            children: Vec::new(),
        }
    }

    /// Add a label in another language.
    pub fn with_label(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.label.insert(lang.into(), text.into());
        self
    }

    /// Set the route.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: MenuNode) -> Self {
        self.children.push(child);
        self
    }

    /// The tag this node carries, derived from its id.
    pub fn tag(&self) -> Option<MenuTag> {
        self.id.as_deref().and_then(MenuTag::from_id)
    }

    /// Label in `lang`, falling back to English, then to any label.
    pub fn label_for(&self, lang: &str) -> Option<&str> {
        self.label
            .get(lang)
            .or_else(|| self.label.get("en"))
            .or_else(|| self.label.values().next())
            .map(String::as_str)
    }
}

/// Tags the role filter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuTag {
    /// Live and historical conversations.
    Conversations,
    /// Chatbot training.
    Training,
    /// Analytics dashboards.
    Analytics,
    /// Console settings.
    Settings,
}

impl MenuTag {
    /// Map a node id to its tag.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "conversations" => Some(Self::Conversations),
            "training" => Some(Self::Training),
            "analytics" => Some(Self::Analytics),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

/// An ordered list of top-level menu items.
pub type MenuTree = Vec<MenuNode>;

/// Parse a menu tree from JSON.
pub fn parse_menu(json: &str) -> Result<MenuTree, AppError> {
    let tree: MenuTree = serde_json::from_str(json)?;
    if let Some(node) = tree.iter().find(|n| n.label.is_empty()) {
        return Err(AppError::validation(format!(
            "Menu item {:?} has no label",
            node.id
        )));
    }
    Ok(tree)
}
