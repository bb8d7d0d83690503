//! Navigation presenter: projects the role policy into the visible menu.
//! Pure function of the current role — recomputed per call, never cached,
//! so it can never drift from the guard's decisions.

use crate::policy::{permitted_screens, Role, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub screen: Screen,
    pub label: &'static str,
    pub path: &'static str,
}

// Canonical menu order, fixed across roles so the menu is stable.
// Deliberately not the policy-table order.
const CANONICAL_ORDER: [(Screen, &str); 6] = [
    (Screen::Dashboard, "Dashboard"),
    (Screen::ServiceCatalog, "Service Catalog"),
    (Screen::ServiceEditor, "Service Editor"),
    (Screen::MarketingKit, "Marketing Kit"),
    (Screen::AdminPanel, "Admin Panel"),
    (Screen::ProfileEditor, "Profile"),
];

pub fn visible_entries(role: Role) -> Vec<NavEntry> {
    let allowed = permitted_screens(role);
    CANONICAL_ORDER
        .iter()
        .filter(|(screen, _)| allowed.contains(screen))
        .map(|(screen, label)| NavEntry { screen: *screen, label, path: screen.path() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_canonical_not_policy_order() {
        let entries = visible_entries(Role::Admin);
        let screens: Vec<Screen> = entries.iter().map(|e| e.screen).collect();
        assert_eq!(
            screens,
            vec![
                Screen::Dashboard,
                Screen::ServiceCatalog,
                Screen::ServiceEditor,
                Screen::MarketingKit,
                Screen::AdminPanel,
                Screen::ProfileEditor,
            ]
        );
    }

    #[test]
    fn unknown_role_sees_nothing() {
        assert!(visible_entries(Role::Unknown).is_empty());
    }
}
