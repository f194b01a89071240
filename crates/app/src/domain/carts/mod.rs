//! Carts
//!
//! Session-scoped shopping carts. Nothing here touches storage; the session
//! store persists a [`Cart`] as part of the session payload.

pub mod data;
pub mod errors;
pub mod models;

pub use data::AddToCart;
pub use errors::CartError;
pub use models::{Cart, CartKey, CartLineItem, MAX_PRICE};
