//! Session keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest key the `sessions` table accepts.
pub const MAX_SESSION_KEY_CHARS: usize = 64;

/// Opaque identifier of one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Mint a fresh, time-ordered key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    /// Accept a key presented by a client, rejecting anything that could not
    /// have been minted here.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let acceptable = !value.is_empty()
            && value.len() <= MAX_SESSION_KEY_CHARS
            && value.chars().all(|c| c.is_ascii_alphanumeric());

        acceptable.then(|| Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
