//! Customer Records

use crate::ids::TypedId;

/// Customer Id
pub type CustomerId = TypedId<CustomerRecord>;

/// Customer Record
#[derive(Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub phone: String,
    pub email: String,

    /// Argon2 PHC string; the plaintext is never stored.
    pub password_hash: String,
}

impl CustomerRecord {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl std::fmt::Debug for CustomerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerRecord")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("address", &self.address)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
