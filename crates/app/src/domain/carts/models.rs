//! Cart Models

use std::{collections::BTreeMap, fmt};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{
    carts::{data::AddToCart, errors::CartError},
    catalog::records::ProductId,
};

/// Upper bound (inclusive) of the display identifier given to new carts.
pub const MAX_CART_ID: u16 = 999;

/// Largest amount, in minor units, a unit price or a cart total may reach.
///
/// Amounts are stored as `BIGINT`, so nothing above `i64::MAX` can be ordered.
pub const MAX_PRICE: u64 = i64::MAX.unsigned_abs();

/// Line and cart totals for a set of lines, or `None` when they pass [`MAX_PRICE`].
fn totals<'a>(lines: impl IntoIterator<Item = &'a CartLineItem>) -> Option<(u64, u64)> {
    lines
        .into_iter()
        .try_fold((0_u64, 0_u64), |(quantity, price), line| {
            let line_total = line.unit_price.checked_mul(u64::from(line.quantity))?;

            Some((
                quantity.checked_add(u64::from(line.quantity))?,
                price.checked_add(line_total)?,
            ))
        })
        .filter(|&(_, price)| price <= MAX_PRICE)
}

/// Line key built from product title and id, `"{title}_{id}"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartKey(String);

impl CartKey {
    #[must_use]
    pub fn new(title: &str, product_id: ProductId) -> Self {
        Self(format!("{title}_{product_id}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product entry in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub title: String,
    pub product_id: ProductId,

    /// Price captured when the product was first added.
    pub unit_price: u64,
    pub quantity: u32,
    pub image: String,
    pub line_total: u64,
}

/// Cart Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub cart_id: String,
    pub total_quantity: u64,
    pub total_price: u64,
    pub lines: BTreeMap<CartKey, CartLineItem>,
}

impl Cart {
    /// An empty cart with a random display identifier.
    #[must_use]
    pub fn new() -> Self {
        let cart_id = rand::thread_rng().gen_range(0..=MAX_CART_ID);

        Self::with_id(cart_id.to_string())
    }

    #[must_use]
    pub fn with_id(cart_id: String) -> Self {
        Self {
            cart_id,
            total_quantity: 0,
            total_price: 0,
            lines: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit, inserting the line when it is new.
    ///
    /// An existing line keeps the unit price it was first added with. A
    /// refused add leaves the cart exactly as it was.
    pub fn add_item(&mut self, item: AddToCart) -> Result<(), CartError> {
        if item.unit_price > MAX_PRICE {
            return Err(CartError::PriceTooHigh(item.unit_price));
        }

        let key = item.key();

        let unit_price = match self.lines.get(&key) {
            Some(line) => {
                if line.quantity == u32::MAX {
                    return Err(CartError::QuantityTooHigh);
                }

                line.unit_price
            }
            None => item.unit_price,
        };

        if self
            .total_price
            .checked_add(unit_price)
            .is_none_or(|total| total > MAX_PRICE)
        {
            return Err(CartError::TotalTooHigh);
        }

        self.lines
            .entry(key.clone())
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLineItem {
                title: item.title,
                product_id: item.product_id,
                unit_price: item.unit_price,
                quantity: 1,
                image: item.image,
                line_total: 0,
            });

        let recomputed = self.recompute();

        if recomputed.is_err() {
            match self.lines.get_mut(&key) {
                Some(line) if line.quantity > 1 => line.quantity -= 1,
                _ => {
                    self.lines.remove(&key);
                }
            }
        }

        recomputed
    }

    /// Remove one unit, dropping the line once none are left.
    ///
    /// Unknown keys leave the cart untouched.
    pub fn remove_item(&mut self, key: &CartKey) {
        if let Some(line) = self.lines.get_mut(key) {
            if line.quantity <= 1 {
                self.lines.remove(key);
            } else {
                line.quantity -= 1;
            }
        }

        // Only a cart saved before prices were bounded can still be over the
        // limit after losing a unit; it cannot be checked out, so drop it.
        if self.recompute().is_err() {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.total_quantity = 0;
        self.total_price = 0;
    }

    /// Rebuild every line total and both cart totals from the current lines.
    ///
    /// Totals that would pass [`MAX_PRICE`] are refused and nothing is changed.
    pub fn recompute(&mut self) -> Result<(), CartError> {
        let (total_quantity, total_price) =
            totals(self.lines.values()).ok_or(CartError::TotalTooHigh)?;

        for line in self.lines.values_mut() {
            line.line_total = line.unit_price * u64::from(line.quantity);
        }

        self.total_quantity = total_quantity;
        self.total_price = total_price;

        Ok(())
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
