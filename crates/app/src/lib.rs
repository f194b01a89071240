//! Storefront domain, persistence, sessions and notifications.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod notifications;
pub mod sessions;

#[cfg(test)]
mod test;
