//! Static role policy: one table mapping each role to its permitted screens
//! and capability flags. Every gating decision in the client (route guard,
//! navigation menu, capability-gated commands) consults this table, so "who
//! can do what" is auditable in a single place.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Closed role set delivered by the backend. Anything outside the set
/// deserializes to `Unknown`, which holds no permissions at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Management,
    Pdo,
    Viewer,
    #[serde(other)]
    Unknown,
}

impl Default for Role {
    // Fail closed when the backend omits or garbles the role field
    fn default() -> Self { Role::Unknown }
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Management, Role::Pdo, Role::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Management => "management",
            Role::Pdo => "pdo",
            Role::Viewer => "viewer",
            Role::Unknown => "unknown",
        }
    }
}

/// Stable identifiers for every navigable area of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Dashboard,
    ServiceCatalog,
    ServiceEditor,
    MarketingKit,
    AdminPanel,
    ProfileEditor,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Dashboard,
        Screen::ServiceCatalog,
        Screen::ServiceEditor,
        Screen::MarketingKit,
        Screen::AdminPanel,
        Screen::ProfileEditor,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::ServiceCatalog => "service-catalog",
            Screen::ServiceEditor => "service-editor",
            Screen::MarketingKit => "marketing-kit",
            Screen::AdminPanel => "admin-panel",
            Screen::ProfileEditor => "profile-editor",
        }
    }

    /// Route path as served by the web frontend; used for remembered
    /// destinations and deep links.
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Dashboard => "/",
            Screen::ServiceCatalog => "/service",
            Screen::ServiceEditor => "/service/edit",
            Screen::MarketingKit => "/marketing-kit",
            Screen::AdminPanel => "/admin",
            Screen::ProfileEditor => "/profile",
        }
    }

    pub fn from_id(id: &str) -> Option<Screen> {
        Screen::ALL.iter().copied().find(|s| s.id() == id)
    }
}

/// Fine-grained actions distinct from screen-level access. A role may see a
/// screen yet lack capabilities on its items (e.g. pdo views the marketing
/// kit but cannot delete collateral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    EditService,
    EditMarketingKit,
    DeleteMarketingKit,
    ManageUsers,
    ManageRoles,
    ReviewUnitChanges,
    ExportCatalog,
}

struct RoleGrant {
    screens: &'static [Screen],
    capabilities: &'static [Capability],
}

// The one policy table. Every known role has an explicit entry; no role is
// silently granted default access.
static POLICY: Lazy<HashMap<Role, RoleGrant>> = Lazy::new(|| {
    use Capability::*;
    use Screen::*;
    let mut m = HashMap::new();
    m.insert(
        Role::Admin,
        RoleGrant {
            screens: &[Dashboard, ServiceCatalog, ServiceEditor, MarketingKit, AdminPanel, ProfileEditor],
            capabilities: &[
                EditService,
                EditMarketingKit,
                DeleteMarketingKit,
                ManageUsers,
                ManageRoles,
                ReviewUnitChanges,
                ExportCatalog,
            ],
        },
    );
    m.insert(
        Role::Management,
        RoleGrant {
            screens: &[Dashboard, ServiceCatalog, MarketingKit, ProfileEditor],
            capabilities: &[ExportCatalog],
        },
    );
    m.insert(
        Role::Pdo,
        RoleGrant {
            screens: &[Dashboard, ServiceCatalog, ServiceEditor, MarketingKit, ProfileEditor],
            capabilities: &[EditService, EditMarketingKit],
        },
    );
    m.insert(
        Role::Viewer,
        RoleGrant {
            screens: &[Dashboard, ServiceCatalog, ProfileEditor],
            capabilities: &[],
        },
    );
    m
});

/// Screens the given role may open. Total over all roles; an unrecognized
/// role maps to the empty set, never a panic.
pub fn permitted_screens(role: Role) -> &'static [Screen] {
    POLICY.get(&role).map(|g| g.screens).unwrap_or(&[])
}

/// Capability check, fail-closed on unknown roles.
pub fn has_capability(role: Role, cap: Capability) -> bool {
    POLICY
        .get(&role)
        .map(|g| g.capabilities.contains(&cap))
        .unwrap_or(false)
}

pub fn screen_allowed(role: Role, screen: Screen) -> bool {
    permitted_screens(role).contains(&screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_role_has_an_entry() {
        for r in Role::ALL {
            assert!(POLICY.contains_key(&r), "missing policy entry for {:?}", r);
        }
    }

    #[test]
    fn unknown_role_is_empty() {
        assert!(permitted_screens(Role::Unknown).is_empty());
        assert!(!has_capability(Role::Unknown, Capability::EditService));
    }

    #[test]
    fn role_strings_round_trip() {
        let r: Role = serde_json::from_str("\"pdo\"").unwrap();
        assert_eq!(r, Role::Pdo);
        let r: Role = serde_json::from_str("\"superuser\"").unwrap();
        assert_eq!(r, Role::Unknown);
    }
}
