//! Role-policy table properties: totality, fail-closed unknown roles, the
//! admin superset relation and capability gating.

use std::collections::HashSet;

use sakti::policy::{has_capability, permitted_screens, Capability, Role, Screen};

#[test]
fn permitted_screens_are_known_screens() {
    for role in Role::ALL {
        for screen in permitted_screens(role) {
            assert!(Screen::ALL.contains(screen), "{:?} grants unknown screen {:?}", role, screen);
        }
    }
}

#[test]
fn admin_is_a_superset_for_non_admin_exclusive_screens() {
    let admin: HashSet<Screen> = permitted_screens(Role::Admin).iter().copied().collect();
    for role in [Role::Management, Role::Pdo, Role::Viewer] {
        for screen in permitted_screens(role) {
            assert!(
                admin.contains(screen),
                "admin lacks {:?} which {:?} holds",
                screen,
                role
            );
        }
    }
}

#[test]
fn admin_panel_is_strictly_admin_only() {
    assert!(permitted_screens(Role::Admin).contains(&Screen::AdminPanel));
    for role in [Role::Management, Role::Pdo, Role::Viewer, Role::Unknown] {
        assert!(
            !permitted_screens(role).contains(&Screen::AdminPanel),
            "{:?} must not reach the admin panel",
            role
        );
    }
}

#[test]
fn unknown_role_has_no_permissions_at_all() {
    assert!(permitted_screens(Role::Unknown).is_empty());
    for cap in [
        Capability::EditService,
        Capability::EditMarketingKit,
        Capability::DeleteMarketingKit,
        Capability::ManageUsers,
        Capability::ManageRoles,
        Capability::ReviewUnitChanges,
        Capability::ExportCatalog,
    ] {
        assert!(!has_capability(Role::Unknown, cap));
    }
}

#[test]
fn screen_access_does_not_imply_item_capability() {
    // pdo sees the marketing kit screen but cannot delete collateral
    assert!(permitted_screens(Role::Pdo).contains(&Screen::MarketingKit));
    assert!(has_capability(Role::Pdo, Capability::EditMarketingKit));
    assert!(!has_capability(Role::Pdo, Capability::DeleteMarketingKit));

    // viewer browses the catalog but edits nothing
    assert!(permitted_screens(Role::Viewer).contains(&Screen::ServiceCatalog));
    assert!(!has_capability(Role::Viewer, Capability::EditService));
}

#[test]
fn admin_only_capabilities() {
    for cap in [Capability::ManageUsers, Capability::ManageRoles, Capability::ReviewUnitChanges] {
        assert!(has_capability(Role::Admin, cap));
        for role in [Role::Management, Role::Pdo, Role::Viewer] {
            assert!(!has_capability(role, cap), "{:?} should lack {:?}", role, cap);
        }
    }
}
