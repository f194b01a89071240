//! Page context pieces shared by every storefront view.

use serde::{Deserialize, Serialize};

use eshopper_app::{
    domain::{
        carts::Cart,
        catalog::records::{HotProduct, ProductRecord},
    },
    sessions::{CustomerSession, SessionState},
};

/// The cart badge and greeting every page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SessionView {
    pub customer: CustomerSession,
    pub cart: Option<Cart>,
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        Self {
            customer: state.customer.clone(),
            cart: state.cart.clone(),
        }
    }
}

/// A product tile with its image file name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ProductCard {
    pub product: ProductRecord,
    pub image_path: String,
}

impl From<ProductRecord> for ProductCard {
    fn from(product: ProductRecord) -> Self {
        Self {
            image_path: product.image_file_name().to_string(),
            product,
        }
    }
}

/// A "hot" tile: a product card plus its struck-through price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct HotProductCard {
    #[serde(flatten)]
    pub card: ProductCard,
    pub price_cut: u64,
}

impl From<HotProduct> for HotProductCard {
    fn from(hot: HotProduct) -> Self {
        Self {
            price_cut: hot.price_cut,
            card: hot.product.into(),
        }
    }
}

pub(crate) fn cards(products: Vec<ProductRecord>) -> Vec<ProductCard> {
    products.into_iter().map(ProductCard::from).collect()
}
