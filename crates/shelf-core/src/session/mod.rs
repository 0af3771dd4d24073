// ── Session store ──
//
// Owns the single optional "current user". Credentials are checked by an
// `AuthProvider`; the session itself is mirrored into durable key-value
// storage so it survives a restart.

pub mod auth;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::Session;
use crate::store::loading::LoadingGuard;

pub use auth::{AuthProvider, CredentialRecord, Identity, StaticAllowList};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

/// Storage key holding the JSON-serialized [`Session`].
pub const SESSION_KEY: &str = "auth_user";

/// Artificial latency applied before every credential check.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(800);

/// Observable state of the session store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<Session>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Result of a [`SessionStore::login`] attempt.
///
/// Login failures are an expected outcome, not an exceptional one, so
/// they come back as a value instead of an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { error: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { error } => Some(error),
        }
    }
}

/// Authenticated-actor store: `anonymous` until a login or a restore
/// succeeds, `authenticated` until logout.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn KeyValueStorage>,
    provider: Arc<dyn AuthProvider>,
    login_delay: Duration,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, provider: Arc<dyn AuthProvider>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            state,
            storage,
            provider,
            login_delay: DEFAULT_LOGIN_DELAY,
        }
    }

    /// Override the simulated latency (zero disables it).
    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn current_user(&self) -> Option<Session> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Point-in-time copy of the whole state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Check credentials and, on a match, install and persist a session.
    ///
    /// A mismatch leaves `user` untouched and records
    /// `"Invalid email or password"` in `error`.
    pub async fn login(&self, email: &str, password: &SecretString) -> LoginOutcome {
        let _loading = LoadingGuard::begin(
            &self.state,
            |s| {
                s.loading = true;
                s.error = None;
            },
            |s| s.loading = false,
        );

        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let result = match self.provider.authenticate(email, password).await {
            Some(identity) => self.persist(Session::new(identity.email, identity.display_name)),
            None => Err(CoreError::InvalidCredentials),
        };

        match result {
            Ok(session) => {
                info!(email = %session.email, "signed in");
                self.state.send_modify(|s| s.user = Some(session));
                LoginOutcome::Success
            }
            Err(e) => {
                debug!(%email, error = %e, "sign-in rejected");
                let error = e.to_string();
                self.state.send_modify(|s| s.error = Some(error.clone()));
                LoginOutcome::Failure { error }
            }
        }
    }

    /// Drop the session from memory and from durable storage.
    pub fn logout(&self) {
        self.state.send_modify(|s| {
            s.user = None;
            s.error = None;
        });
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!(error = %e, "failed to remove persisted session");
        }
        info!("signed out");
    }

    /// Reinstall a session persisted by an earlier process.
    ///
    /// An absent key is a no-op. A copy that no longer deserializes is
    /// deleted and the store stays anonymous; the failure is only logged.
    pub fn restore_session(&self) -> Option<Session> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "session storage unreadable, resetting");
                if let Err(e) = self.storage.remove(SESSION_KEY) {
                    warn!(error = %e, "failed to reset session storage");
                }
                self.state.send_modify(|s| s.user = None);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                debug!(email = %session.email, "restored persisted session");
                self.state.send_modify(|s| s.user = Some(session.clone()));
                Some(session)
            }
            Err(e) => {
                warn!(error = %e, "discarding corrupt persisted session");
                if let Err(e) = self.storage.remove(SESSION_KEY) {
                    warn!(error = %e, "failed to remove corrupt session");
                }
                self.state.send_modify(|s| s.user = None);
                None
            }
        }
    }

    fn persist(&self, session: Session) -> Result<Session, CoreError> {
        let json = serde_json::to_string(&session)?;
        self.storage.set(SESSION_KEY, &json)?;
        Ok(session)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .field("login_delay", &self.login_delay)
            .finish_non_exhaustive()
    }
}
