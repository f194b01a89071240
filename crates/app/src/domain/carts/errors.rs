//! Cart errors.

use thiserror::Error;

use crate::domain::carts::models::MAX_PRICE;

/// Why a unit could not be added to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("unit price {0} is above the maximum of {MAX_PRICE}")]
    PriceTooHigh(u64),

    #[error("line quantity is at its maximum")]
    QuantityTooHigh,

    #[error("cart total would exceed {MAX_PRICE}")]
    TotalTooHigh,
}
