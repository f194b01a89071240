//! Carts

pub(crate) mod handlers;
mod links;

pub(crate) use handlers::*;
