//! Storefront Domain Concerns

pub mod carts;
pub mod catalog;
pub mod customers;
pub mod orders;
