//! Cart Data

use crate::domain::{carts::models::CartKey, catalog::records::ProductId};

/// Product details carried by an add-to-cart link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub title: String,
    pub product_id: ProductId,
    pub unit_price: u64,
    pub image: String,
}

impl AddToCart {
    #[must_use]
    pub fn key(&self) -> CartKey {
        CartKey::new(&self.title, self.product_id)
    }
}
