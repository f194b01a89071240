//! Session store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session payload could not be encoded")]
    Encode(#[source] serde_json::Error),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
