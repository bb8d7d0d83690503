use parking_lot::RwLock;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::tprintln;

use super::profile::{ProfilePatch, UserProfile};
use super::token::{TokenCell, TokenFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Loading,
    Authenticated,
}

/// Read-only view of the session handed to subscribers. Other components
/// never hold a private mutable copy that could drift from the store.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub user: Option<UserProfile>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated && self.user.is_some()
    }
}

struct State {
    status: SessionStatus,
    user: Option<UserProfile>,
    // Bumped by every logout; a login/restore response arriving under a
    // stale generation is discarded, so logout always wins the race.
    generation: u64,
}

/// Single source of truth for "who is logged in and with what credential".
pub struct SessionStore {
    state: RwLock<State>,
    tokens: TokenCell,
    file: TokenFile,
    tx: watch::Sender<SessionSnapshot>,
}

// Wire shapes for the auth endpoints.
#[derive(Debug, Deserialize)]
struct LoginBody {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ProfileBody {
    user: UserProfile,
}

impl SessionStore {
    pub fn new(tokens: TokenCell, file: TokenFile) -> Self {
        let initial = SessionSnapshot { status: SessionStatus::Unauthenticated, user: None };
        let (tx, _rx) = watch::channel(initial);
        Self {
            state: RwLock::new(State {
                status: SessionStatus::Unauthenticated,
                user: None,
                generation: 0,
            }),
            tokens,
            file,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let s = self.state.read();
        SessionSnapshot { status: s.status, user: s.user.clone() }
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().status
    }

    fn publish(&self) {
        let snap = self.snapshot();
        let _ = self.tx.send_replace(snap);
    }

    /// Attempt a silent restore from the persisted token. Without a token
    /// file this is a pure no-op: no network call happens at all. A failed
    /// profile fetch clears the persisted token and is terminal for this
    /// boot cycle.
    pub async fn restore(&self, gateway: &Gateway) -> AppResult<bool> {
        let Some(token) = self.file.load() else {
            self.state.write().status = SessionStatus::Unauthenticated;
            self.publish();
            return Ok(false);
        };

        let gen = {
            let mut s = self.state.write();
            s.status = SessionStatus::Loading;
            s.generation
        };
        self.tokens.set(Some(token));
        self.publish();

        match gateway.get::<ProfileBody>("/auth/profile").await {
            Ok(body) => {
                let mut s = self.state.write();
                if s.generation != gen {
                    drop(s);
                    tprintln!("session.restore superseded by logout");
                    return Ok(false);
                }
                s.status = SessionStatus::Authenticated;
                s.user = Some(body.user);
                drop(s);
                self.publish();
                info!(target: "sakti", "session restored from persisted token");
                Ok(true)
            }
            Err(e) => {
                let mut s = self.state.write();
                if s.generation == gen {
                    s.status = SessionStatus::Unauthenticated;
                    s.user = None;
                    drop(s);
                    self.tokens.set(None);
                    self.file.clear();
                    self.publish();
                }
                warn!(target: "sakti", "session restore failed: {}", e);
                Err(e)
            }
        }
    }

    /// Submit credentials and establish a session. On any failure the store
    /// stays `Unauthenticated` and nothing is persisted; the backend's error
    /// message is carried through verbatim when present.
    pub async fn login(&self, gateway: &Gateway, email: &str, password: &str) -> AppResult<UserProfile> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "missing_credentials".to_string(),
                "Email and password are required".to_string(),
            ));
        }

        let gen = self.state.read().generation;

        let body = serde_json::json!({ "email": email, "password": password });
        let login: LoginBody = gateway.post("/auth/login", &body).await?;

        // The profile fetch needs the fresh token on the wire, but nothing
        // is persisted until the whole handshake lands.
        if self.state.read().generation != gen {
            return Err(login_superseded());
        }
        self.tokens.set(Some(login.token.clone()));

        let profile = match gateway.get::<ProfileBody>("/auth/profile").await {
            Ok(body) => body.user,
            Err(e) => {
                if self.state.read().generation == gen {
                    self.tokens.set(None);
                }
                return Err(e);
            }
        };

        {
            let mut s = self.state.write();
            if s.generation != gen {
                // A logout resolved while we were in flight; it wins.
                drop(s);
                return Err(login_superseded());
            }
            s.status = SessionStatus::Authenticated;
            s.user = Some(profile.clone());
        }
        if let Err(e) = self.file.store(&login.token) {
            warn!(target: "sakti", "could not persist token: {}", e);
        }
        self.publish();
        info!(target: "sakti", "auth.login user={} role={}", profile.email, profile.role.as_str());
        Ok(profile)
    }

    /// Synchronously drop the session. Idempotent: logging out while already
    /// unauthenticated is a no-op apart from the generation bump that
    /// invalidates any in-flight login.
    pub fn logout(&self) {
        {
            let mut s = self.state.write();
            s.generation += 1;
            s.status = SessionStatus::Unauthenticated;
            s.user = None;
        }
        self.tokens.set(None);
        self.file.clear();
        self.publish();
        info!(target: "sakti", "auth.logout");
    }

    /// Central handling for a rejected credential observed on any call:
    /// drop the session so the next guard evaluation redirects to login.
    pub fn note_unauthorized(&self) {
        if self.status() == SessionStatus::Authenticated {
            warn!(target: "sakti", "credential rejected mid-session, logging out");
            self.logout();
        }
    }

    /// Local optimistic merge after a confirmed backend write. No network,
    /// no role re-validation.
    pub fn update_profile(&self, patch: &ProfilePatch) {
        {
            let mut s = self.state.write();
            if let Some(user) = s.user.as_mut() {
                user.apply(patch);
            }
        }
        self.publish();
    }
}

fn login_superseded() -> AppError {
    AppError::auth("login_superseded".to_string(), "Signed out while login was in flight".to_string())
}
