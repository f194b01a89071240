//! Storefront Handlers

pub(crate) mod collections;
pub(crate) mod home;
pub(crate) mod product;
pub(crate) mod search;
