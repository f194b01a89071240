//! Catalog Data

use crate::domain::catalog::records::CategoryId;

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub material: String,
    pub description: Option<String>,
    pub price: u64,
    pub category_id: CategoryId,
    pub image: String,
}
