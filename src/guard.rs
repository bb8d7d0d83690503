//! Route guard chain: for each navigation target, two independent gates run
//! in order — "is a session established", then "does the role satisfy the
//! screen's allow-list". Denials for a missing session remember the
//! attempted destination so a later login can return there.

use parking_lot::RwLock;
use tracing::debug;

use crate::policy::{screen_allowed, Screen};
use crate::session::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the destination.
    Allow,
    /// No session: go to the login screen, destination remembered.
    RedirectToLogin,
    /// Session present but role lacks the screen: silent redirect home.
    RedirectToHome,
}

/// A concrete navigation target: the gated screen plus the exact requested
/// path (detail routes carry an id, e.g. `/service/42`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub screen: Screen,
    pub path: String,
}

impl Destination {
    pub fn screen(screen: Screen) -> Self {
        Self { screen, path: screen.path().to_string() }
    }

    pub fn detail(screen: Screen, path: impl Into<String>) -> Self {
        Self { screen, path: path.into() }
    }
}

#[derive(Default)]
pub struct RouteGuard {
    // Destination captured on the most recent no-session denial.
    pending: RwLock<Option<Destination>>,
}

impl RouteGuard {
    pub fn new() -> Self { Self::default() }

    /// Evaluate the chain for one navigation attempt from current session
    /// state. Synchronous and side-effect free apart from remembering the
    /// destination on a no-session denial.
    pub fn evaluate(&self, session: &SessionSnapshot, target: &Destination) -> GuardDecision {
        if !session.is_authenticated() {
            *self.pending.write() = Some(target.clone());
            debug!(target: "sakti", "guard deny-no-session target={}", target.path);
            return GuardDecision::RedirectToLogin;
        }
        let role = session.user.as_ref().map(|u| u.role).unwrap_or_default();
        if screen_allowed(role, target.screen) {
            GuardDecision::Allow
        } else {
            // Navigation decision, not a request failure: no notification
            debug!(target: "sakti", "guard deny-wrong-role role={} target={}", role.as_str(), target.path);
            GuardDecision::RedirectToHome
        }
    }

    pub fn evaluate_screen(&self, session: &SessionSnapshot, screen: Screen) -> GuardDecision {
        self.evaluate(session, &Destination::screen(screen))
    }

    /// Post-login redirect target, yielded exactly once.
    pub fn take_remembered(&self) -> Option<Destination> {
        self.pending.write().take()
    }

    pub fn remembered(&self) -> Option<Destination> {
        self.pending.read().clone()
    }
}
