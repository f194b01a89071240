//! Per-session request serialization.

use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::sessions::key::SessionKey;

type Registry = Mutex<FxHashMap<SessionKey, Arc<AsyncMutex<()>>>>;

/// Hands out one lock per session key so requests for the same session run
/// their read-modify-write one at a time.
#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    registry: Arc<Registry>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of `key`.
    pub async fn acquire(&self, key: &SessionKey) -> SessionLease {
        let lock = {
            let mut registry = self
                .registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            Arc::clone(registry.entry(key.clone()).or_default())
        };

        let guard = lock.lock_owned().await;

        SessionLease {
            key: key.clone(),
            guard: Some(guard),
            registry: Arc::clone(&self.registry),
        }
    }

    /// Number of sessions currently holding or awaiting a lock.
    #[must_use]
    pub fn active(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Exclusive use of one session; released on drop.
#[derive(Debug)]
pub struct SessionLease {
    key: SessionKey,
    guard: Option<OwnedMutexGuard<()>>,
    registry: Arc<Registry>,
}

impl SessionLease {
    #[must_use]
    pub fn key(&self) -> &SessionKey {
        &self.key
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut registry = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Only the registry itself still references an idle lock.
        if registry
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            registry.remove(&self.key);
        }
    }
}
