//! Customers

pub mod data;
pub mod errors;
pub mod password;
pub mod records;
mod repository;
pub mod service;
pub mod validation;

pub use errors::CustomersServiceError;
pub use service::*;
