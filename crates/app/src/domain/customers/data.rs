//! Customer Data

use serde::{Deserialize, Serialize};

/// Sign-up form as submitted; every field may be missing.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("address", &self.address)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Contact details a guest submits with the checkout form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl std::fmt::Debug for GuestDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuestDetails")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("address", &self.address)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Customer ready to be persisted, password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
}
