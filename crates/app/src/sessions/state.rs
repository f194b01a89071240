//! Session payload.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    domain::{
        carts::Cart,
        customers::records::{CustomerId, CustomerRecord},
    },
    sessions::errors::SessionStoreError,
};

/// Payload layout written by this build.
pub const SESSION_STATE_VERSION: u32 = 1;

/// Name shown to visitors who have not logged in.
pub const GUEST_DISPLAY_NAME: &str = "Guest";

/// Everything a session remembers between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub version: u32,
    pub customer: CustomerSession,
    pub cart: Option<Cart>,
}

impl SessionState {
    /// The session cart, created on first use.
    pub fn ensure_cart(&mut self) -> &mut Cart {
        self.cart.get_or_insert_with(Cart::new)
    }

    /// Whether the session holds a cart with at least one line.
    #[must_use]
    pub fn has_items(&self) -> bool {
        self.cart.as_ref().is_some_and(|cart| !cart.is_empty())
    }

    /// Serialize for the session store.
    pub fn encode(&self) -> Result<Vec<u8>, SessionStoreError> {
        serde_json::to_vec(self).map_err(SessionStoreError::Encode)
    }

    /// Read a stored payload.
    ///
    /// Blobs that cannot be read, or were written by another layout version,
    /// start the session over instead of failing the request.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Self>(bytes) {
            Ok(state) if state.version == SESSION_STATE_VERSION => state,
            Ok(state) => {
                warn!(
                    version = state.version,
                    expected = SESSION_STATE_VERSION,
                    "discarding session payload with unknown version"
                );

                Self::default()
            }
            Err(error) => {
                warn!(error = %error, "discarding unreadable session payload");

                Self::default()
            }
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            version: SESSION_STATE_VERSION,
            customer: CustomerSession::default(),
            cart: None,
        }
    }
}

/// Display-only snapshot of the visitor's profile.
///
/// `id` is present only after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSession {
    pub first_name: String,
    pub last_name: Option<String>,
    pub id: Option<CustomerId>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl CustomerSession {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }
}

impl Default for CustomerSession {
    fn default() -> Self {
        Self {
            first_name: GUEST_DISPLAY_NAME.to_string(),
            last_name: None,
            id: None,
            email: None,
            address: None,
            phone: None,
        }
    }
}

impl From<&CustomerRecord> for CustomerSession {
    fn from(customer: &CustomerRecord) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: Some(customer.last_name.clone()),
            id: Some(customer.id),
            email: Some(customer.email.clone()),
            address: customer.address.clone(),
            phone: Some(customer.phone.clone()),
        }
    }
}
