//! Route-guard chain tests: the two-gate decision, remembered destinations
//! and the post-login redirect, plus menu/guard consistency.

use sakti::guard::{Destination, GuardDecision, RouteGuard};
use sakti::nav;
use sakti::policy::{Role, Screen};
use sakti::session::{SessionSnapshot, SessionStatus, UserProfile};

fn unauthenticated() -> SessionSnapshot {
    SessionSnapshot { status: SessionStatus::Unauthenticated, user: None }
}

fn authenticated_as(role: Role) -> SessionSnapshot {
    SessionSnapshot {
        status: SessionStatus::Authenticated,
        user: Some(UserProfile {
            id: 9,
            name: "Test User".into(),
            email: "test@sakti.test".into(),
            role,
            ..Default::default()
        }),
    }
}

#[test]
fn no_session_denies_every_protected_screen() {
    let guard = RouteGuard::new();
    for screen in Screen::ALL {
        assert_eq!(
            guard.evaluate_screen(&unauthenticated(), screen),
            GuardDecision::RedirectToLogin,
            "{:?} should bounce to login without a session",
            screen
        );
    }
}

#[test]
fn loading_counts_as_no_session() {
    let guard = RouteGuard::new();
    let snap = SessionSnapshot { status: SessionStatus::Loading, user: None };
    assert_eq!(guard.evaluate_screen(&snap, Screen::Dashboard), GuardDecision::RedirectToLogin);
}

#[test]
fn viewer_denied_admin_panel_and_menu_never_lists_it() {
    let guard = RouteGuard::new();
    let snap = authenticated_as(Role::Viewer);
    assert_eq!(guard.evaluate_screen(&snap, Screen::AdminPanel), GuardDecision::RedirectToHome);
    assert_eq!(guard.evaluate_screen(&snap, Screen::Dashboard), GuardDecision::Allow);

    let menu = nav::visible_entries(Role::Viewer);
    assert!(menu.iter().all(|e| e.screen != Screen::AdminPanel));
}

#[test]
fn admin_allowed_everywhere() {
    let guard = RouteGuard::new();
    let snap = authenticated_as(Role::Admin);
    for screen in Screen::ALL {
        assert_eq!(guard.evaluate_screen(&snap, screen), GuardDecision::Allow);
    }
}

#[test]
fn unknown_role_is_denied_but_not_bounced_to_login() {
    let guard = RouteGuard::new();
    let snap = authenticated_as(Role::Unknown);
    assert_eq!(guard.evaluate_screen(&snap, Screen::Dashboard), GuardDecision::RedirectToHome);
}

#[test]
fn denied_destination_is_remembered_for_post_login_redirect() {
    let guard = RouteGuard::new();
    let dest = Destination::detail(Screen::ServiceCatalog, "/service/42");
    assert_eq!(guard.evaluate(&unauthenticated(), &dest), GuardDecision::RedirectToLogin);
    assert_eq!(guard.remembered().unwrap().path, "/service/42");

    // After a successful login the remembered destination is allowed and
    // consumed exactly once
    let snap = authenticated_as(Role::Viewer);
    let remembered = guard.take_remembered().unwrap();
    assert_eq!(remembered.path, "/service/42");
    assert_eq!(guard.evaluate(&snap, &remembered), GuardDecision::Allow);
    assert!(guard.take_remembered().is_none());
}

#[test]
fn later_denial_overwrites_remembered_destination() {
    let guard = RouteGuard::new();
    guard.evaluate(&unauthenticated(), &Destination::screen(Screen::MarketingKit));
    guard.evaluate(&unauthenticated(), &Destination::detail(Screen::ServiceCatalog, "/service/7"));
    assert_eq!(guard.take_remembered().unwrap().path, "/service/7");
}

#[test]
fn wrong_role_denial_does_not_touch_remembered_destination() {
    let guard = RouteGuard::new();
    guard.evaluate(&unauthenticated(), &Destination::detail(Screen::ServiceCatalog, "/service/7"));
    // an authenticated wrong-role denial must not clobber the login redirect
    guard.evaluate(&authenticated_as(Role::Viewer), &Destination::screen(Screen::AdminPanel));
    assert_eq!(guard.take_remembered().unwrap().path, "/service/7");
}
