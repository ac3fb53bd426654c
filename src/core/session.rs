//! Session context injected into the order core
//!
//! The dashboard keeps its bearer token and the logged-in owner in
//! persistent storage. The core never reads that storage directly. It is
//! handed a [`SessionContext`] and asks it for the token and owner, and tells
//! it when the collaborator rejected the token.

use std::sync::{Arc, RwLock};

/// What the order core needs to know about the logged-in user
pub trait SessionContext: Send + Sync {
    /// Bearer token for the collaborator, `None` when logged out
    fn token(&self) -> Option<String>;

    /// Laundry owner the session acts for
    fn owner_id(&self) -> Option<i64>;

    /// Called once per 401 response; the host clears persisted state and
    /// sends the user back to the login page
    fn on_unauthorized(&self);
}

#[derive(Debug, Clone, Default)]
struct SessionState {
    token: Option<String>,
    owner_id: Option<i64>,
    unauthorized_count: usize,
}

/// In-process session, cleared on 401
///
/// Suitable for tests and for hosts that keep the session in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    state: Arc<RwLock<SessionState>>,
}

impl MemorySession {
    pub fn new(token: impl Into<String>, owner_id: i64) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState {
                token: Some(token.into()),
                owner_id: Some(owner_id),
                unauthorized_count: 0,
            })),
        }
    }

    /// A session with no token and no owner
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.read(|s| s.token.is_some())
    }

    /// Number of times the collaborator rejected this session
    pub fn unauthorized_count(&self) -> usize {
        self.read(|s| s.unauthorized_count)
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        match self.state.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

impl SessionContext for MemorySession {
    fn token(&self) -> Option<String> {
        self.read(|s| s.token.clone())
    }

    fn owner_id(&self) -> Option<i64> {
        self.read(|s| s.owner_id)
    }

    fn on_unauthorized(&self) {
        tracing::warn!("session rejected by server, clearing session state");
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.token = None;
        guard.owner_id = None;
        guard.unauthorized_count += 1;
    }
}
