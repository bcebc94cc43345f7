//! Integration tests for role-based menu filtering.

mod helpers;

use deskhub_auth::{RoleBasedMenuFilter, SettingsSection};
use deskhub_entity::menu::{MenuTag, default_menu, parse_menu};
use deskhub_entity::user::RoleAuthority;

fn tags(tree: &[deskhub_entity::menu::MenuNode]) -> Vec<Option<MenuTag>> {
    tree.iter().map(|n| n.tag()).collect()
}

#[test]
fn test_service_manager_sees_conversations_and_analytics() {
    let filter = RoleBasedMenuFilter::new();
    let visible = filter.filter(&default_menu(), &RoleAuthority::ServiceManager);
    assert_eq!(
        tags(&visible),
        vec![Some(MenuTag::Conversations), Some(MenuTag::Analytics)]
    );
}

#[test]
fn test_every_role_is_idempotent() {
    let filter = RoleBasedMenuFilter::new();
    let tree = default_menu();
    for role in RoleAuthority::ALL {
        let once = filter.filter(&tree, &role);
        assert_eq!(filter.filter(&once, &role), once, "{role}");
    }
}

#[test]
fn test_loaded_tree_keeps_children() {
    let json = r#"[
        {"id": "conversations", "label": {"et": "Vestlused", "en": "Conversations"},
         "children": [{"label": {"en": "Unanswered"}, "path": "/unanswered"}]},
        {"id": "settings", "label": {"en": "Settings"}, "path": "/settings"},
        {"label": {"en": "Help"}, "path": "/help"}
    ]"#;
    let tree = parse_menu(json).unwrap();
    let filter = RoleBasedMenuFilter::new();

    let csa = filter.filter(&tree, &RoleAuthority::CustomerSupportAgent);
    assert_eq!(csa.len(), 2);
    assert_eq!(csa[0].children, tree[0].children);
    assert_eq!(csa[1].label_for("en"), Some("Help"));

    for authorities in [
        vec!["ROLE_UNAUTHENTICATED"],
        vec!["ROLE_JANITOR"],
        vec!["ROLE_JANITOR", "ROLE_ADMINISTRATOR"],
    ] {
        let role = RoleAuthority::primary(authorities.iter().copied());
        assert!(filter.filter_for(&tree, role.as_ref()).is_empty(), "{authorities:?}");
    }
}

#[test]
fn test_settings_sections_per_role() {
    let policies = RoleBasedMenuFilter::new().policies().clone();
    assert_eq!(
        policies.visible_sections(Some(&RoleAuthority::CustomerSupportAgent)),
        vec![
            SettingsSection::NewChatNotifications,
            SettingsSection::ForwardedChatNotifications,
            SettingsSection::Autocorrect,
        ]
    );
    assert_eq!(
        policies.visible_sections(Some(&RoleAuthority::ChatbotTrainer)),
        vec![SettingsSection::Autocorrect]
    );
    assert!(
        policies
            .visible_sections(Some(&RoleAuthority::Unauthenticated))
            .is_empty()
    );
    assert!(policies.visible_sections(None).is_empty());
}

#[tokio::test]
async fn test_header_exposes_filter_requests() {
    let console = helpers::TestConsole::new();
    let (header, _rx) = console.header(&["ROLE_CHATBOT_TRAINER"]);
    assert_eq!(
        tags(&header.snapshot().menu),
        vec![Some(MenuTag::Training), Some(MenuTag::Analytics)]
    );
    let analyst = header.on_menu_filter_request(Some(&RoleAuthority::Analyst));
    assert_eq!(tags(&analyst), vec![Some(MenuTag::Analytics)]);
}
