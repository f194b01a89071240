//! Catalog Records

use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Category Id
pub type CategoryId = TypedId<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
}

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub material: String,
    pub description: Option<String>,

    /// Unit price in minor currency units.
    pub price: u64,

    pub amount_sold: u64,
    pub category_id: CategoryId,
    pub category_name: String,

    /// Stored image reference, usually a path under the media root.
    pub image: String,
}

impl ProductRecord {
    /// The file name part of the image reference, as used in asset URLs.
    #[must_use]
    pub fn image_file_name(&self) -> &str {
        image_file_name(&self.image)
    }
}

/// Strip everything up to and including the last `/` of an image reference.
#[must_use]
pub fn image_file_name(image: &str) -> &str {
    image.rsplit('/').next().unwrap_or(image)
}

/// A "hot" product shown with a struck-through reference price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotProduct {
    pub product: ProductRecord,
    pub price_cut: u64,
}

impl From<ProductRecord> for HotProduct {
    fn from(product: ProductRecord) -> Self {
        Self {
            price_cut: price_cut(product.price),
            product,
        }
    }
}

/// Display-only markup: `floor(price * 1.6)`.
#[must_use]
pub fn price_cut(price: u64) -> u64 {
    price.saturating_mul(16) / 10
}
