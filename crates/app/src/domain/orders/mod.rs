//! Orders

pub mod data;
pub mod errors;
pub mod planner;
pub mod records;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
