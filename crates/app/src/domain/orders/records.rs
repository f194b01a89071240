//! Order Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{catalog::records::ProductId, customers::records::CustomerId},
    ids::TypedId,
};

/// Order Id
pub type OrderId = TypedId<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub customer_id: CustomerId,

    /// Delivery address as it was when the order was placed.
    pub address: String,
    pub phone: String,
    pub placed_at: Timestamp,
    pub status: bool,
}

/// Order Item Id
pub type OrderItemId = TypedId<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_title: String,
    pub quantity: u32,

    /// Unit price charged, frozen at checkout.
    pub price: u64,
}

impl OrderItemRecord {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}
