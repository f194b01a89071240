//! Sessions
//!
//! Browser sessions are a typed [`SessionState`] persisted as an opaque blob
//! through a [`SessionStore`]. [`SessionManager`] opens a session under its
//! per-key lock and writes it back when the request is done.

use std::{fmt, sync::Arc};

use tracing::debug;

pub mod errors;
pub mod key;
pub mod locks;
pub mod state;
pub mod store;

pub use errors::SessionStoreError;
pub use key::SessionKey;
pub use locks::{SessionLease, SessionLocks};
pub use state::{CustomerSession, SESSION_STATE_VERSION, SessionState};
pub use store::{MemorySessionStore, PgSessionStore, SessionStore};

/// What closing a session did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionWrite {
    Saved,
    Unchanged,
}

#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            locks: SessionLocks::new(),
        }
    }

    /// Lock and load the session for `presented`, starting a new one when the
    /// key is missing or unknown to the store.
    pub async fn open(
        &self,
        presented: Option<SessionKey>,
    ) -> Result<OpenSession, SessionStoreError> {
        if let Some(key) = presented {
            let lease = self.locks.acquire(&key).await;

            if let Some(payload) = self.store.load(&key).await? {
                return Ok(OpenSession {
                    state: SessionState::decode(&payload),
                    stored: Some(payload),
                    lease,
                });
            }

            debug!("presented session key is unknown; starting a new session");
        }

        let key = SessionKey::generate();
        let lease = self.locks.acquire(&key).await;

        Ok(OpenSession {
            state: SessionState::default(),
            stored: None,
            lease,
        })
    }

    /// Persist the session if its state changed, then release its lock.
    ///
    /// A new session whose state is still the default is never written.
    pub async fn close(&self, session: OpenSession) -> Result<SessionWrite, SessionStoreError> {
        if session.is_new() && session.state == SessionState::default() {
            return Ok(SessionWrite::Unchanged);
        }

        let payload = session.state.encode()?;

        if session.stored.as_deref() == Some(payload.as_slice()) {
            return Ok(SessionWrite::Unchanged);
        }

        self.store.save(session.key(), payload).await?;

        Ok(SessionWrite::Saved)
    }

    /// Remove a session from the store entirely.
    pub async fn destroy(&self, session: OpenSession) -> Result<(), SessionStoreError> {
        if !session.is_new() {
            self.store.delete(session.key()).await?;
        }

        Ok(())
    }
}

/// A loaded session, exclusively held until it is closed or dropped.
#[derive(Debug)]
pub struct OpenSession {
    state: SessionState,
    stored: Option<Vec<u8>>,
    lease: SessionLease,
}

impl OpenSession {
    #[must_use]
    pub fn key(&self) -> &SessionKey {
        self.lease.key()
    }

    /// Whether this session was minted by the current request.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.stored.is_none()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Forget everything the session holds while keeping its key.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
    }
}
