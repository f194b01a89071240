//! Session stores.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, query, query_scalar};
use tokio::sync::RwLock;

use crate::{
    database::Db,
    sessions::{errors::SessionStoreError, key::SessionKey},
};

const LOAD_SESSION_SQL: &str = include_str!("sql/load_session.sql");
const SAVE_SESSION_SQL: &str = include_str!("sql/save_session.sql");
const DELETE_SESSION_SQL: &str = include_str!("sql/delete_session.sql");

/// Key to blob persistence for session payloads.
#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The stored payload, or `None` for an unknown key.
    async fn load(&self, key: &SessionKey) -> Result<Option<Vec<u8>>, SessionStoreError>;

    /// Insert or replace the payload for `key`.
    async fn save(&self, key: &SessionKey, payload: Vec<u8>) -> Result<(), SessionStoreError>;

    /// Forget `key`; unknown keys are not an error.
    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError>;
}

/// Sessions kept in the `sessions` table.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    db: Db,
}

impl PgSessionStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Vec<u8>>, SessionStoreError> {
        let mut tx = self.db.begin().await?;

        let payload = query_scalar::<Postgres, Vec<u8>>(LOAD_SESSION_SQL)
            .bind(key.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(payload)
    }

    async fn save(&self, key: &SessionKey, payload: Vec<u8>) -> Result<(), SessionStoreError> {
        let mut tx = self.db.begin().await?;

        query(SAVE_SESSION_SQL)
            .bind(key.as_str())
            .bind(payload)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        let mut tx = self.db.begin().await?;

        query(DELETE_SESSION_SQL)
            .bind(key.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Sessions kept in process memory; lost on restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<FxHashMap<SessionKey, Vec<u8>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Vec<u8>>, SessionStoreError> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn save(&self, key: &SessionKey, payload: Vec<u8>) -> Result<(), SessionStoreError> {
        self.sessions.write().await.insert(key.clone(), payload);

        Ok(())
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(key);

        Ok(())
    }
}
