use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::principal::{Identity, Role};
use super::provider::{AuthProvider, LocalAuthProvider, LoginRequest, RegisterRequest};
use crate::error::SessionError;
use crate::storage::SessionStore;

/// Storage key holding the serialized Identity. Nothing else writes here.
pub const SESSION_KEY: &str = "vita_health_user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Resolving,
    Authenticated(Identity),
    Anonymous,
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(id) => Some(id),
            _ => None,
        }
    }
}

/// Decrements the in-flight counter when a login/register call finishes, on every path.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(c: &'a AtomicUsize) -> Self {
        c.fetch_add(1, Ordering::SeqCst);
        Self(c)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) { self.0.fetch_sub(1, Ordering::SeqCst); }
}

/// Owns the current identity and its persisted copy.
///
/// Calls are expected one at a time; overlapping `login`/`register` calls each write the
/// session key and the last one to finish wins.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn AuthProvider>,
    latency: Duration,
    state: RwLock<SessionState>,
    pending: AtomicUsize,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, provider: Arc<dyn AuthProvider>, latency: Duration) -> Self {
        Self { store, provider, latency, state: RwLock::new(SessionState::Uninitialized), pending: AtomicUsize::new(0) }
    }

    /// Manager backed by the two demo accounts.
    pub fn with_seed_users(store: Arc<dyn SessionStore>, latency: Duration) -> Self {
        Self::new(store, Arc::new(LocalAuthProvider::seeded()), latency)
    }

    pub fn latency(&self) -> Duration { self.latency }

    pub fn state(&self) -> SessionState { self.state.read().clone() }

    pub fn current(&self) -> Option<Identity> { self.state.read().identity().cloned() }

    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
            || matches!(*self.state.read(), SessionState::Uninitialized | SessionState::Resolving)
    }

    /// Read the persisted session, if any. A missing, unreadable or malformed entry
    /// resolves to Anonymous.
    pub fn resolve(&self) -> SessionState {
        *self.state.write() = SessionState::Resolving;
        let next = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => {
                    info!(target: "vitahealth::session", "session.resolve restored id={} role={}", identity.id, identity.role);
                    SessionState::Authenticated(identity)
                }
                Err(e) => {
                    warn!(target: "vitahealth::session", "session.resolve ignoring malformed entry: {}", e);
                    SessionState::Anonymous
                }
            },
            Ok(None) => {
                debug!(target: "vitahealth::session", "session.resolve no stored session");
                SessionState::Anonymous
            }
            Err(e) => {
                warn!(target: "vitahealth::session", "session.resolve store unreadable: {}", e);
                SessionState::Anonymous
            }
        };
        *self.state.write() = next.clone();
        next
    }

    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<Identity, SessionError> {
        let _pending = PendingGuard::enter(&self.pending);
        self.simulate_latency().await;
        let identity = match self.provider.authenticate(&LoginRequest::new(email, password, role)) {
            Ok(id) => id,
            Err(e) => {
                warn!(target: "vitahealth::session", "auth.login rejected email={} role={}: {}", email, role, e);
                return Err(e);
            }
        };
        self.persist(&identity)?;
        info!(target: "vitahealth::session", "auth.login id={} role={}", identity.id, identity.role);
        Ok(identity)
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<Identity, SessionError> {
        req.validate()?;
        let _pending = PendingGuard::enter(&self.pending);
        self.simulate_latency().await;
        let identity = match self.provider.enroll(&req) {
            Ok(id) => id,
            Err(e) => {
                warn!(target: "vitahealth::session", "auth.register rejected email={} role={}: {}", req.email, req.role, e);
                return Err(e);
            }
        };
        if let Err(e) = self.persist(&identity) {
            warn!(target: "vitahealth::session", "auth.register rolled back id={}: {}", identity.id, e);
            self.provider.withdraw(&identity.id);
            return Err(e);
        }
        info!(target: "vitahealth::session", "auth.register id={} role={}", identity.id, identity.role);
        Ok(identity)
    }

    /// Clears the persisted entry and the in-memory identity. Never fails; a store that
    /// refuses the removal is logged and the in-memory session is still dropped.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            warn!(target: "vitahealth::session", "auth.logout could not clear stored session: {}", e);
        }
        let prev = std::mem::replace(&mut *self.state.write(), SessionState::Anonymous);
        if let Some(id) = prev.identity() {
            info!(target: "vitahealth::session", "auth.logout id={}", id.id);
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn persist(&self, identity: &Identity) -> Result<(), SessionError> {
        let raw = serde_json::to_string_pretty(identity).map_err(crate::error::StorageError::from)?;
        self.store.set(SESSION_KEY, &raw)?;
        *self.state.write() = SessionState::Authenticated(identity.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
