//! The menu tree bundled with the console.

use super::node::{MenuNode, MenuTree};

/// Build the default side-navigation tree.
pub fn default_menu() -> MenuTree {
    vec![
        MenuNode::new("conversations", "Conversations")
            .with_label("et", "Vestlused")
            .with_child(leaf("Unanswered", "Vastamata", "/chat/unanswered"))
            .with_child(leaf("Active", "Aktiivsed", "/chat/active"))
            .with_child(leaf("History", "Ajalugu", "/chat/history")),
        MenuNode::new("training", "Training")
            .with_label("et", "Treening")
            .with_child(leaf("Intents", "Teemad", "/training/intents"))
            .with_child(leaf("Stories", "Lood", "/training/stories"))
            .with_child(leaf("Models", "Mudelid", "/training/models")),
        MenuNode::new("analytics", "Analytics")
            .with_label("et", "Analüütika")
            .with_child(leaf("Overview", "Ülevaade", "/analytics/overview"))
            .with_child(leaf("Chats", "Vestlused", "/analytics/chats"))
            .with_child(leaf("Feedback", "Tagasiside", "/analytics/feedback")),
        MenuNode::new("settings", "Administration")
            .with_label("et", "Haldus")
            .with_child(leaf("Users", "Kasutajad", "/settings/users"))
            .with_child(leaf("Chatbot", "Vestlusbot", "/settings/chatbot"))
            .with_child(leaf("Working time", "Asutuse tööaeg", "/settings/working-time")),
    ]
}

fn leaf(en: &str, et: &str, path: &str) -> MenuNode {
    MenuNode {
        id: None,
        label: [("en", en), ("et", et)]
            .into_iter()
            .map(|(lang, text)| (lang.to_string(), text.to_string()))
            .collect(),
        path: Some(path.to_string()),
        children: Vec::new(),
    }
}
